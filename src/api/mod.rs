pub mod decode;
pub mod sihf;

pub use decode::decode;
pub use sihf::SihfClient;
