use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};
use tracing::info;

/// Secondary indexes backing the two queue queries. Plain SQL so the same
/// statements run on Postgres and the SQLite test database.
const INDEXES: &[&str] = &[
    // Owner pending-verification queue.
    "CREATE INDEX IF NOT EXISTS idx_analysis_factory_status \
     ON analysis (factory_id, verification_status)",
    // Labourer pending-submission list.
    "CREATE INDEX IF NOT EXISTS idx_analysis_labourer_status \
     ON analysis (labourer_id, verification_status)",
];

pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    for sql in INDEXES {
        db.execute_raw(Statement::from_string(backend, (*sql).to_string()))
            .await?;
    }
    info!(count = INDEXES.len(), "Ensured analysis indexes");
    Ok(())
}
