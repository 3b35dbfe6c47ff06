//! Error taxonomy for resource-client calls.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` describes what went wrong on the wire (transport, non-2xx
//! status, undecodable body). Store and catalog operations never hand it to
//! callers directly: they log it and re-raise an `ActionError` whose message
//! is the server-supplied text when there is one, else a localized fallback
//! for the action that failed.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Language used for fallback messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Placeholder shown when a movie has no director credit.
    #[must_use]
    pub fn no_director(self) -> &'static str {
        match self {
            Self::En => "No director information",
            Self::Zh => "暂无导演信息",
        }
    }
}

/// Wire-level failure of a single resource-client request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// HTTP status for non-2xx responses.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message supplied by the server in the error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}

/// Operation a normalized error belongs to. Selects the fallback message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Register,
    Login,
    FetchUser,
    FetchUsers,
    UpdateUser,
    DeleteUser,
    FetchMovies,
    SearchMovies,
    GetMovie,
    FetchGenres,
    GetGenre,
    AddGenre,
    UpdateGenre,
    DeleteGenre,
    FetchPeople,
}

impl Action {
    #[must_use]
    pub fn fallback_message(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Register => "Registration failed",
                Self::Login => "Login failed",
                Self::FetchUser => "Failed to fetch user",
                Self::FetchUsers => "Failed to fetch user list",
                Self::UpdateUser => "Failed to update user",
                Self::DeleteUser => "Failed to delete user",
                Self::FetchMovies => "Failed to fetch movies",
                Self::SearchMovies => "Failed to search movies",
                Self::GetMovie => "Failed to fetch movie",
                Self::FetchGenres => "Failed to fetch genres",
                Self::GetGenre => "Failed to fetch genre",
                Self::AddGenre => "Failed to add genre",
                Self::UpdateGenre => "Failed to update genre",
                Self::DeleteGenre => "Failed to delete genre",
                Self::FetchPeople => "Failed to fetch people",
            },
            Locale::Zh => match self {
                Self::Register => "注册失败",
                Self::Login => "登录失败",
                Self::FetchUser => "获取用户信息失败",
                Self::FetchUsers => "获取用户列表失败",
                Self::UpdateUser => "更新用户信息失败",
                Self::DeleteUser => "删除用户失败",
                Self::FetchMovies => "获取电影列表失败",
                Self::SearchMovies => "搜索电影失败",
                Self::GetMovie => "获取电影详情失败",
                Self::FetchGenres => "获取类型列表失败",
                Self::GetGenre => "获取类型失败",
                Self::AddGenre => "添加类型失败",
                Self::UpdateGenre => "更新类型失败",
                Self::DeleteGenre => "删除类型失败",
                Self::FetchPeople => "获取人物列表失败",
            },
        }
    }
}

/// Normalized failure surfaced to callers of store and catalog operations.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
    pub action: Action,
    pub status: Option<u16>,
    pub message: String,
    #[source]
    pub source: ApiError,
}

impl ActionError {
    /// Log a wire failure and wrap it with the message callers should show.
    #[must_use]
    pub fn from_api(action: Action, locale: Locale, source: ApiError) -> Self {
        let status = source.status();
        let message = source
            .server_message()
            .map_or_else(|| action.fallback_message(locale).to_owned(), ToOwned::to_owned);
        tracing::warn!(?action, ?status, error = %source, "resource request failed");
        Self { action, status, message, source }
    }
}
