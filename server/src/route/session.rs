use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{LoginRequest, SessionTransformer};
use crate::response::SessionPresenter;
use crate::session::Authenticated;
use application::service::{SignInService, SignOutService};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

pub trait SessionRouter {
    fn route_session(self) -> Self;
}

impl SessionRouter for Router<AppModule> {
    fn route_session(self) -> Self {
        self.route(
            "/login",
            post(
                |State(module): State<AppModule>, Json(req): Json<LoginRequest>| async move {
                    Controller::new(SessionTransformer, SessionPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.handler().sign_in(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/logout",
            post(
                |State(module): State<AppModule>, session: Authenticated| async move {
                    Controller::new(SessionTransformer, SessionPresenter)
                        .intake(session)
                        .handle(|dto| async move { module.handler().sign_out(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
