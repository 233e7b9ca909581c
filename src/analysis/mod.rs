pub mod change;
pub mod lights;
