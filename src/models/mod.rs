pub mod collection;
pub mod note;
pub mod scene;
pub mod character;
pub mod location;
pub mod script;
pub mod user;
pub mod conf;
mod lenient;

pub use collection::Collection;
pub use note::Note;
pub use scene::Scene;
pub use character::Character;
pub use location::Location;
pub use script::{AssetKind, Script};
pub use user::{ChatMessage, UserRecord};
pub use conf::Conf;
