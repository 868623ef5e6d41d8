pub mod resource;
pub mod settings;

pub use resource::*;
pub use settings::*;
