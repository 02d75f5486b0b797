pub mod batch;

pub use batch::batch;
