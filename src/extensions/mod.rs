//! Optional extensions to the base camera interactor.

pub mod animate_to;
#[cfg(feature = "extension_path_indicator")]
pub mod path_indicator;
