/// Identity context carried explicitly on every controller call.
///
/// `user_id` is the labourer for submission controllers and the owner for
/// verification controllers. There is no ambient session state; dropping a
/// session affects nothing on the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    pub factory_id: i32,
}

impl Session {
    pub fn new(user_id: i32, factory_id: i32) -> Self {
        Self {
            user_id,
            factory_id,
        }
    }
}
