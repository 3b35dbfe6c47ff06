use super::*;

fn status_error(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Status { status, message: message.map(ToOwned::to_owned) }
}

// =============================================================================
// ApiError
// =============================================================================

#[test]
fn status_error_exposes_status_and_message() {
    let err = status_error(409, Some("Username already exists"));
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.server_message(), Some("Username already exists"));
}

#[test]
fn blank_server_message_is_ignored() {
    let err = status_error(500, Some("   "));
    assert_eq!(err.server_message(), None);
}

#[test]
fn status_error_display_without_message() {
    let err = status_error(502, None);
    assert_eq!(err.to_string(), "HTTP 502: no message");
}

#[test]
fn decode_error_has_no_status() {
    let err = ApiError::from(serde_json::from_str::<u32>("nope").unwrap_err());
    assert_eq!(err.status(), None);
    assert_eq!(err.server_message(), None);
}

// =============================================================================
// ActionError
// =============================================================================

#[test]
fn action_error_prefers_server_message() {
    let err = ActionError::from_api(Action::Login, Locale::En, status_error(401, Some("Invalid credentials")));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.status, Some(401));
    assert_eq!(err.action, Action::Login);
}

#[test]
fn action_error_falls_back_to_localized_message() {
    let err = ActionError::from_api(Action::Login, Locale::Zh, status_error(500, None));
    assert_eq!(err.message, "登录失败");

    let err = ActionError::from_api(Action::Register, Locale::En, status_error(500, None));
    assert_eq!(err.message, "Registration failed");
}

#[test]
fn every_action_has_fallbacks_in_both_locales() {
    let actions = [
        Action::Register,
        Action::Login,
        Action::FetchUser,
        Action::FetchUsers,
        Action::UpdateUser,
        Action::DeleteUser,
        Action::FetchMovies,
        Action::SearchMovies,
        Action::GetMovie,
        Action::FetchGenres,
        Action::GetGenre,
        Action::AddGenre,
        Action::UpdateGenre,
        Action::DeleteGenre,
        Action::FetchPeople,
    ];
    for action in actions {
        assert!(!action.fallback_message(Locale::En).is_empty(), "{action:?}");
        assert!(!action.fallback_message(Locale::Zh).is_empty(), "{action:?}");
    }
}

#[test]
fn no_director_placeholder_is_localized() {
    assert_eq!(Locale::Zh.no_director(), "暂无导演信息");
    assert_eq!(Locale::En.no_director(), "No director information");
}
