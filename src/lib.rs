pub mod cli;
pub mod commands;
pub mod error;

pub mod core {
    pub mod cluster;
    pub mod variant;
}

pub mod io {
    pub mod batch_writer;
    pub mod vcf_reader;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
