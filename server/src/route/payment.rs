use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{DeletePaymentRequest, PaymentTransformer, UpdatePaymentRequest};
use crate::response::PaymentPresenter;
use crate::session::Authenticated;
use application::service::{DeletePaymentService, UpdatePaymentService};
use axum::extract::{Path, State};
use axum::routing::patch;
use axum::{Json, Router};
use uuid::Uuid;

pub trait PaymentRouter {
    fn route_payment(self) -> Self;
}

impl PaymentRouter for Router<AppModule> {
    fn route_payment(self) -> Self {
        self.route(
            "/payments/:payment_id",
            patch(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(payment_id): Path<Uuid>,
                 Json(req): Json<UpdatePaymentRequest>| async move {
                    Controller::new(PaymentTransformer, PaymentPresenter)
                        .intake((payment_id, req))
                        .handle(|dto| async move { module.handler().update_payment(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(payment_id): Path<Uuid>| async move {
                    Controller::new(PaymentTransformer, PaymentPresenter)
                        .intake(DeletePaymentRequest::new(payment_id))
                        .handle(|dto| async move { module.handler().delete_payment(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
