//! 基础设施层
//!
//! 持有浏览器页面资源，只暴露能力，不认识业务

pub mod chrome_driver;
pub mod js_executor;
pub mod ui_driver;

pub use chrome_driver::ChromeDriver;
pub use js_executor::JsExecutor;
pub use ui_driver::{FieldKind, TableRow, UiDriver};
