pub mod helpers;
pub mod list;
pub mod read;
pub mod create;
pub mod update;
pub mod delete;

pub use self::list::list;
pub use self::read::{detail, edit_form};
pub use self::create::{new_form, create};
pub use self::update::update;
pub use self::delete::{confirm_delete, delete};
