use super::*;

fn user(name: &str) -> User {
    User {
        user_id: "user_0123456789ab".to_owned(),
        email: "ana@example.com".to_owned(),
        name: name.to_owned(),
        picture: None,
        credits: 5,
        created_at: None,
    }
}

#[test]
fn loading_message_switches_on_bootstrap() {
    assert_eq!(loading_message(true), "Loading...");
    assert_eq!(loading_message(false), "Redirecting...");
}

#[test]
fn greeting_uses_first_name() {
    assert_eq!(greeting(Some(&user("Ana Lima"))), "Welcome back, Ana");
    assert_eq!(greeting(Some(&user("   "))), "Welcome back");
    assert_eq!(greeting(None), "Welcome back");
}
