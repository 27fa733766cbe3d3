pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod screen;
pub mod session;
pub mod sink;

pub use app::App;
pub use config::{AppConfig, ConfigLoader, LogConfig};
pub use logging::{LogFormat, init_logging};
pub use sink::{CompleteReport, JsonFileSink, ResultSink, SinkError, StdoutSink};
