// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login flow tests against the mock portal.
//!
//! These tests verify that:
//! 1. A password login sets the session flag and returns to the saved path
//! 2. MFA accounts only get the flag after the one-time code is accepted
//! 3. Rejected submissions show the server message and keep the step
//! 4. Logout and session checks keep the flag in sync with the server

use docportal::error::ClientError;
use docportal::login::{LoginFlow, LoginStep};
use docportal::models::{Role, UserRequest};
use docportal::notify::Notice;
use docportal::services::{QueryCache, QueryKind};

mod common;
use common::{test_client, TestClient, EMAIL, MFA_EMAIL, PASSWORD, QR_CODE, USER_ID};

fn flow(t: &TestClient, from: Option<&str>) -> LoginFlow {
    LoginFlow::new(
        t.client.users().clone(),
        t.session.clone(),
        from.map(str::to_string),
    )
}

fn fill_credentials(flow: &mut LoginFlow, email: &str, password: &str) {
    let values = flow.credentials_mut().values_mut();
    values.email = email.to_string();
    values.password = password.to_string();
}

#[tokio::test]
async fn test_password_login_sets_flag_and_redirects() {
    let t = test_client().await;
    let mut flow = flow(&t, Some("/documents/abc"));
    fill_credentials(&mut flow, EMAIL, PASSWORD);

    let step = flow.submit_credentials().await.unwrap().clone();
    assert_eq!(
        step,
        LoginStep::Complete {
            redirect: "/documents/abc".to_string()
        }
    );
    assert!(t.session.is_logged_in());
    assert_eq!(t.session.user().unwrap().email, EMAIL);
    assert!(flow.error().is_none());
    assert!(t.notices.notices().contains(&Notice::success("Login success")));

    // The session cookie is sent with later requests
    let user = t.client.users().fetch_user().await.unwrap();
    assert_eq!(user.into_data().unwrap().user.user_id, USER_ID);
}

#[tokio::test]
async fn test_mfa_login_requires_code() {
    let t = test_client().await;
    let mut flow = flow(&t, None);
    fill_credentials(&mut flow, MFA_EMAIL, PASSWORD);

    let step = flow.submit_credentials().await.unwrap();
    assert!(matches!(step, LoginStep::TwoFactor { .. }));
    assert!(!t.session.is_logged_in());
    assert_eq!(flow.code().unwrap().values().user_id, USER_ID);

    flow.code_mut().unwrap().values_mut().fill(QR_CODE);
    let step = flow.submit_code().await.unwrap().clone();

    assert_eq!(
        step,
        LoginStep::Complete {
            redirect: "/".to_string()
        }
    );
    assert!(t.session.is_logged_in());
    assert!(flow.code().is_none());
    assert_eq!(t.portal.hits("qrcode"), 1);
}

#[tokio::test]
async fn test_wrong_code_keeps_two_factor_step() {
    let t = test_client().await;
    let mut flow = flow(&t, None);
    fill_credentials(&mut flow, MFA_EMAIL, PASSWORD);
    flow.submit_credentials().await.unwrap();

    flow.code_mut().unwrap().values_mut().fill("654321");
    let err = flow.submit_code().await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(flow.error(), Some("Invalid QR code. Please try again."));
    assert!(matches!(flow.step(), LoginStep::TwoFactor { .. }));
    assert!(!flow.code().unwrap().is_submitting());
    assert!(!t.session.is_logged_in());
}

#[tokio::test]
async fn test_invalid_code_form_is_not_sent() {
    let t = test_client().await;
    let mut flow = flow(&t, None);
    fill_credentials(&mut flow, MFA_EMAIL, PASSWORD);
    flow.submit_credentials().await.unwrap();

    flow.code_mut().unwrap().values_mut().fill("12a4");
    let err = flow.submit_code().await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(t.portal.hits("qrcode"), 0);
}

#[tokio::test]
async fn test_invalid_credentials_form_is_not_sent() {
    let t = test_client().await;
    let mut flow = flow(&t, None);

    let err = flow.submit_credentials().await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(t.portal.hits("login"), 0);

    assert!(flow.credentials().field_error("email").is_some());
    assert_eq!(
        flow.credentials().field_error("password").as_deref(),
        Some("Password is required")
    );
    assert_eq!(flow.step(), &LoginStep::Credentials);
}

#[tokio::test]
async fn test_wrong_password_shows_server_message() {
    let t = test_client().await;
    let mut flow = flow(&t, None);
    fill_credentials(&mut flow, EMAIL, "wrong");

    let err = flow.submit_credentials().await.unwrap_err();
    assert_eq!(err.display_message(), "Incorrect email or password");
    assert_eq!(flow.error(), Some("Incorrect email or password"));
    assert_eq!(flow.step(), &LoginStep::Credentials);
    assert!(!flow.credentials().is_submitting());
    assert_eq!(
        t.notices.notices(),
        vec![Notice::error("Incorrect email or password")]
    );
}

#[tokio::test]
async fn test_other_unauthorized_messages_keep_flag() {
    let t = test_client().await;
    t.session.flags().set(true).unwrap();

    let result = t
        .client
        .users()
        .login_user(&UserRequest {
            email: EMAIL.to_string(),
            password: Some("wrong".to_string()),
        })
        .await;

    assert_eq!(result.unwrap_err().status(), Some(401));
    assert!(t.session.is_logged_in());
}

#[tokio::test]
async fn test_flow_completes_when_already_logged_in() {
    let t = test_client().await;
    t.session.flags().set(true).unwrap();

    let flow = flow(&t, Some("/user/settings"));
    assert_eq!(
        flow.step(),
        &LoginStep::Complete {
            redirect: "/user/settings".to_string()
        }
    );
    assert_eq!(t.portal.hits("login"), 0);
}

#[tokio::test]
async fn test_logout_clears_flag_and_profile_cache() {
    let t = test_client().await;
    let mut flow = flow(&t, None);
    fill_credentials(&mut flow, EMAIL, PASSWORD);
    flow.submit_credentials().await.unwrap();

    t.client.users().fetch_user().await.unwrap();
    let key = QueryCache::key(QueryKind::FetchUser, &());
    assert!(t.client.cache().contains(&key));

    assert!(t.session.user().is_some());
    t.client.users().logout().await.unwrap();

    assert!(!t.session.is_logged_in());
    assert!(t.session.user().is_none());
    assert_eq!(t.session.role(), None);
    assert!(!t.client.cache().contains(&key));
    assert_eq!(t.portal.hits("logout"), 1);
}

#[tokio::test]
async fn test_session_check_rejects_stale_flag() {
    let t = test_client().await;
    t.session.flags().set(true).unwrap();

    let logged_in = t.session.check(t.client.users()).await.unwrap();

    assert!(!logged_in);
    assert!(!t.session.is_logged_in());
    assert!(t
        .notices
        .notices()
        .contains(&Notice::error("You are not logged in")));
}

#[tokio::test]
async fn test_session_check_restores_user() {
    let t = test_client().await;
    t.login().await;
    assert!(!t.session.is_logged_in());

    let logged_in = t.session.check(t.client.users()).await.unwrap();

    assert!(logged_in);
    assert!(t.session.is_logged_in());
    assert_eq!(t.session.role(), Some(Role::User));
}
