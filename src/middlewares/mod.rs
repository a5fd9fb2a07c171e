pub mod request_profile;

pub use request_profile::RequestProfile;
