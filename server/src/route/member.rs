use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    CreatePaymentRequest, DeleteMemberRequest, GetMemberRequest, MemberTransformer,
    PaymentTransformer, PaymentsOfMemberRequest, SearchRequest, UpdateMemberRequest,
};
use crate::response::{MemberPresenter, PaymentPresenter};
use crate::session::Authenticated;
use application::service::{
    CreatePaymentService, DeleteMemberService, GetMemberService, GetPaymentService,
    UpdateMemberService,
};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

pub trait MemberRouter {
    fn route_member(self) -> Self;
}

impl MemberRouter for Router<AppModule> {
    fn route_member(self) -> Self {
        self.route(
            "/members/:member_id",
            get(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(member_id): Path<String>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake(GetMemberRequest::new(member_id))
                        .handle(|dto| async move { module.handler().get_member(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(member_id): Path<String>,
                 Json(req): Json<UpdateMemberRequest>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake((member_id, req))
                        .handle(|dto| async move { module.handler().update_member(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(member_id): Path<String>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake(DeleteMemberRequest::new(member_id))
                        .handle(|dto| async move { module.handler().delete_member(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/members/:member_id/payments",
            get(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(member_id): Path<String>,
                 Query(search): Query<SearchRequest>| async move {
                    Controller::new(PaymentTransformer, PaymentPresenter)
                        .intake(PaymentsOfMemberRequest::new(member_id, search))
                        .handle(|dto| async move {
                            module.handler().get_payments_of_member(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(member_id): Path<String>,
                 Json(req): Json<CreatePaymentRequest>| async move {
                    Controller::new(PaymentTransformer, PaymentPresenter)
                        .intake((member_id, req))
                        .handle(|dto| async move { module.handler().create_payment(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
