pub mod sections;
pub mod styles;
pub mod view;

pub use view::Landing;
