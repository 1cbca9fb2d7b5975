use serde_json::json;

use crate::common::{DEFAULT_PASSWORD, TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register_with_valid_details() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "Ada", "email": "Ada@Example.com ", "password": DEFAULT_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["name"], "Ada");
        assert_eq!(res.body["email"], "ada@example.com");
        assert_eq!(res.body["role"], "student");
        assert!(res.body.get("password").is_none());
    }

    #[tokio::test]
    async fn instructors_can_self_register() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "name": "Grace",
                    "email": "grace@example.com",
                    "password": DEFAULT_PASSWORD,
                    "role": "instructor",
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["role"], "instructor");
    }

    #[tokio::test]
    async fn cannot_self_register_as_admin() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "name": "Mallory",
                    "email": "mallory@example.com",
                    "password": DEFAULT_PASSWORD,
                    "role": "admin",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn cannot_register_an_email_twice_in_any_case() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "Ada", "email": "ada@example.com", "password": DEFAULT_PASSWORD}),
            )
            .await;
        assert_eq!(first.status, 201, "First registration failed: {}", first.text);

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "Ada 2", "email": "ADA@example.com", "password": DEFAULT_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn cannot_register_with_a_short_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "Ada", "email": "ada@example.com", "password": "short"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::REGISTER, &json!({"email": "ada@example.com"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_receives_a_token() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("ada@example.com", "student")
            .await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "ADA@example.com", "password": DEFAULT_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(res.body["name"], "ada");
        assert_eq!(res.body["role"], "student");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("ada@example.com", "student")
            .await;

        let wrong_password = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "ada@example.com", "password": "not-the-password"}),
            )
            .await;
        let unknown_email = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "nobody@example.com", "password": DEFAULT_PASSWORD}),
            )
            .await;

        for res in [wrong_password, unknown_email] {
            assert_eq!(res.status, 401);
            assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
            assert_eq!(res.body["message"], "Invalid email or password");
        }
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn returns_the_current_user() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("grace@example.com", "instructor")
            .await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["email"], "grace@example.com");
        assert_eq!(res.body["role"], "instructor");
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn rejects_a_forged_token() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
