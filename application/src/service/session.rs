use error_stack::Report;

use kernel::interface::session::{
    AccountVerifier, DependOnAccountVerifier, DependOnSessionStore, SessionStore,
};
use kernel::prelude::entity::{Credential, Session, SessionToken};
use kernel::KernelError;

use crate::transfer::{AuthenticateDto, SessionDto, SignInDto, SignOutDto};

#[async_trait::async_trait]
pub trait SignInService: 'static + Sync + Send + DependOnAccountVerifier + DependOnSessionStore {
    async fn sign_in(&self, dto: SignInDto) -> error_stack::Result<SessionDto, KernelError> {
        let credential = Credential::new(dto.email, dto.password);
        let Some(account) = self.account_verifier().verify(&credential) else {
            tracing::warn!("rejected sign-in for {}", credential.email());
            return Err(Report::new(KernelError::Unauthorized)
                .attach_printable("email or password is incorrect"));
        };
        let token = self.session_store().issue(&account).await?;
        let session = Session::new(token, account);
        tracing::info!("{session} signed in");
        Ok(SessionDto::from(session))
    }
}

impl<T> SignInService for T where T: DependOnAccountVerifier + DependOnSessionStore {}

#[async_trait::async_trait]
pub trait SignOutService: 'static + Sync + Send + DependOnSessionStore {
    async fn sign_out(&self, dto: SignOutDto) -> error_stack::Result<(), KernelError> {
        self.session_store()
            .revoke(&SessionToken::new(dto.token))
            .await
    }
}

impl<T> SignOutService for T where T: DependOnSessionStore {}

#[async_trait::async_trait]
pub trait AuthenticateService: 'static + Sync + Send + DependOnSessionStore {
    /// Resolves a bearer token to the session it was issued for.
    async fn authenticate(
        &self,
        dto: AuthenticateDto,
    ) -> error_stack::Result<SessionDto, KernelError> {
        let token = SessionToken::new(dto.token);
        let account = self
            .session_store()
            .resolve(&token)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Unauthorized)
                    .attach_printable("session is missing or expired")
            })?;
        Ok(SessionDto::from(Session::new(token, account)))
    }
}

impl<T> AuthenticateService for T where T: DependOnSessionStore {}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::fixture::{TestModule, ADMIN_EMAIL, ADMIN_PASSWORD};
    use crate::service::{AuthenticateService, SignInService, SignOutService};
    use crate::transfer::{AuthenticateDto, SignInDto, SignOutDto};

    #[tokio::test]
    async fn session_lifecycle() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new().await;
        let session = module
            .sign_in(SignInDto {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .await?;
        assert_eq!(session.email, ADMIN_EMAIL);

        let resolved = module
            .authenticate(AuthenticateDto {
                token: session.token.clone(),
            })
            .await?;
        assert_eq!(resolved, session);

        module
            .sign_out(SignOutDto {
                token: session.token.clone(),
            })
            .await?;
        let report = module
            .authenticate(AuthenticateDto {
                token: session.token,
            })
            .await
            .expect_err("token was revoked");
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let module = TestModule::new().await;
        let report = module
            .sign_in(SignInDto {
                email: ADMIN_EMAIL.to_string(),
                password: "guess".to_string(),
            })
            .await
            .expect_err("bad password");
        assert_eq!(report.current_context(), &KernelError::Unauthorized);

        let report = module
            .authenticate(AuthenticateDto {
                token: "made-up".to_string(),
            })
            .await
            .expect_err("unknown token");
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
    }
}
