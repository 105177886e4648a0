pub mod auth_dto;

pub use auth_dto::{
    AuthSessionDto, GoogleSignInQuery, LoginRequestDto, OAuthCallbackQuery, RegisterRequestDto,
};
