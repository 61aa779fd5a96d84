pub mod directory;
pub mod import_form;
pub mod selection;

pub use directory::Directory;
pub use import_form::ImportForm;
pub use selection::SelectionState;
