//! Session, password, registration, and profile routes

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{
    ApiDetail, AuthToken, LoginRequest, PasswordChangeRequest, PasswordResetConfirmRequest,
    PasswordResetRequest, PatchedUserDetails, RegisterRequest, ResendVerificationRequest,
    UserDetails, VerifyEmailRequest,
};

impl ApiClient {
    /// Exchange credentials for a session token
    pub async fn login(&self, body: &LoginRequest) -> Result<AuthToken> {
        self.send_json(Method::POST, "/dj-rest-auth/login/", body, "login")
            .await
    }

    /// Invalidate the current session token on the backend
    pub async fn logout(&self) -> Result<ApiDetail> {
        self.post_empty("/dj-rest-auth/logout/", "logout").await
    }

    /// Change the password of the authenticated user
    pub async fn change_password(&self, body: &PasswordChangeRequest) -> Result<ApiDetail> {
        self.send_json(
            Method::POST,
            "/dj-rest-auth/password/change/",
            body,
            "password_change",
        )
        .await
    }

    /// Trigger a password-reset email
    pub async fn reset_password(&self, body: &PasswordResetRequest) -> Result<ApiDetail> {
        self.send_json(
            Method::POST,
            "/dj-rest-auth/password/reset/",
            body,
            "password_reset",
        )
        .await
    }

    /// Complete a password reset from an emailed uid/token pair
    pub async fn confirm_password_reset(
        &self,
        body: &PasswordResetConfirmRequest,
    ) -> Result<ApiDetail> {
        self.send_json(
            Method::POST,
            "/dj-rest-auth/password/reset/confirm/",
            body,
            "password_reset_confirm",
        )
        .await
    }

    /// Register a new user; returns a session token on success
    pub async fn register(&self, body: &RegisterRequest) -> Result<AuthToken> {
        self.send_json(Method::POST, "/dj-rest-auth/registration/", body, "register")
            .await
    }

    /// Resend the verification email for an unverified address
    pub async fn resend_verification_email(
        &self,
        body: &ResendVerificationRequest,
    ) -> Result<ApiDetail> {
        self.send_json(
            Method::POST,
            "/dj-rest-auth/registration/resend-email/",
            body,
            "resend_verification_email",
        )
        .await
    }

    /// Verify the email address associated with an emailed key
    pub async fn verify_email(&self, body: &VerifyEmailRequest) -> Result<ApiDetail> {
        self.send_json(
            Method::POST,
            "/dj-rest-auth/registration/verify-email/",
            body,
            "verify_email",
        )
        .await
    }

    /// Profile of the authenticated user
    pub async fn user_details(&self) -> Result<UserDetails> {
        self.get_json("/dj-rest-auth/user/", "user_details").await
    }

    /// Replace the mutable profile fields (username, first/last name)
    pub async fn update_user_details(&self, body: &UserDetails) -> Result<UserDetails> {
        self.send_json(Method::PUT, "/dj-rest-auth/user/", body, "update_user_details")
            .await
    }

    /// Partially update the profile; only populated fields are sent
    pub async fn patch_user_details(&self, body: &PatchedUserDetails) -> Result<UserDetails> {
        self.send_json(
            Method::PATCH,
            "/dj-rest-auth/user/",
            body,
            "patch_user_details",
        )
        .await
    }
}
