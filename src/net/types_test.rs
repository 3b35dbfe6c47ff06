use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_user() -> User {
    User {
        id: 7,
        username: "ada".to_owned(),
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.test".to_owned(),
        role: "user".to_owned(),
        gender: Some("female".to_owned()),
    }
}

// =============================================================
// User
// =============================================================

#[test]
fn user_round_trips_all_session_fields() {
    let user = make_user();
    let json = serde_json::to_string(&user).unwrap();
    let back: User = serde_json::from_str(&json).unwrap();
    assert_eq!(back, user);
}

#[test]
fn user_accepts_numeric_gender() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 1, "username": "bob", "gender": 2
    }))
    .unwrap();
    assert_eq!(user.gender.as_deref(), Some("2"));
}

#[test]
fn user_missing_optional_fields_default() {
    let user: User = serde_json::from_value(serde_json::json!({"id": 1, "username": "bob"})).unwrap();
    assert_eq!(user.name, "");
    assert_eq!(user.role, "");
    assert!(user.gender.is_none());
}

#[test]
fn user_null_gender_is_none() {
    let user: User =
        serde_json::from_value(serde_json::json!({"id": 1, "username": "bob", "gender": null})).unwrap();
    assert!(user.gender.is_none());
}

#[test]
fn user_rejects_structured_gender() {
    let result = serde_json::from_value::<User>(serde_json::json!({"id": 1, "username": "bob", "gender": [1]}));
    assert!(result.is_err());
}

#[test]
fn user_ignores_backend_only_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 3,
        "username": "root",
        "role": "admin",
        "password": "",
        "created_at": "2024-01-01T00:00:00Z",
        "favorite_movies": []
    }))
    .unwrap();
    assert!(user.is_admin());
}

#[test]
fn is_admin_requires_exact_role() {
    let mut user = make_user();
    assert!(!user.is_admin());
    user.role = "Admin".to_owned();
    assert!(!user.is_admin());
    user.role = ADMIN_ROLE.to_owned();
    assert!(user.is_admin());
}

// =============================================================
// Registration / Page
// =============================================================

#[test]
fn registration_omits_missing_name() {
    let body = Registration {
        username: "new".to_owned(),
        password: "pw".to_owned(),
        email: "new@example.test".to_owned(),
        name: None,
    };
    let value = serde_json::to_value(&body).unwrap();
    assert!(value.get("name").is_none());
}

#[test]
fn page_defaults_missing_counters() {
    let page: Page<Genre> =
        serde_json::from_value(serde_json::json!({"results": [{"id": 1, "name": "Drama"}]})).unwrap();
    assert_eq!(page.page, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.results.len(), 1);
}

// =============================================================
// Movie
// =============================================================

#[test]
fn movie_keeps_unknown_fields_in_extra() {
    let movie: Movie = serde_json::from_value(serde_json::json!({
        "id": 42,
        "title": "Alien",
        "vote_average": 8.4,
        "Director": {"People": {"name": "Ridley Scott"}}
    }))
    .unwrap();
    assert_eq!(movie.title, "Alien");
    assert!(movie.extra.contains_key("Director"));
    assert!((movie.rating).abs() < f64::EPSILON);
}
