pub mod detail_poller;
pub mod model_worker;
pub mod summary_poller;

pub use detail_poller::DetailPoller;
pub use model_worker::ModelWorker;
pub use summary_poller::SummaryPoller;
