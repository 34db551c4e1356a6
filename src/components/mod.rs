pub mod navigation;
pub mod skin;

pub use navigation::NavigationComponent;
pub use skin::Skin;
