
mod analysis;
mod labourer;
