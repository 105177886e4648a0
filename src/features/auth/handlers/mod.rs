pub mod auth_handler;

pub use auth_handler::{
    __path_get_me, __path_get_session, __path_google_sign_in, __path_login, __path_logout,
    __path_oauth_callback, __path_register, get_me, get_session, google_sign_in, login, logout,
    oauth_callback, register,
};
