mod backend_auth_client;

pub use backend_auth_client::{AuthGateway, BackendAuthClient};
