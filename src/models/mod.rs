pub mod forms;
pub mod state;

// 重新导出核心类型
pub use forms::{CreateFileForm, RenameFileForm};
pub use state::AppState;
