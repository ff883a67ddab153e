pub mod athlete;
pub mod reference;
