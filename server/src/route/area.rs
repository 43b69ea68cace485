use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    AreaTransformer, CreateMemberRequest, GetAreaRequest, MemberTransformer,
    NextReferenceRequest, PaymentTransformer, PaymentsOfAreaRequest, SearchRequest,
};
use crate::response::{AreaPresenter, MemberPresenter, PaymentPresenter};
use crate::session::Authenticated;
use application::service::{
    CreateMemberService, GetAreaService, GetMemberService, GetPaymentService,
};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

pub trait AreaRouter {
    fn route_area(self) -> Self;
}

impl AreaRouter for Router<AppModule> {
    fn route_area(self) -> Self {
        self.route(
            "/areas",
            get(
                |State(module): State<AppModule>, _: Authenticated| async move {
                    Controller::new((), AreaPresenter)
                        .bypass(|| async move { module.handler().get_areas().await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/areas/:area_id",
            get(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(area_id): Path<String>| async move {
                    Controller::new(AreaTransformer, AreaPresenter)
                        .intake(GetAreaRequest::new(area_id))
                        .handle(|dto| async move { module.handler().get_area(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/areas/:area_id/members",
            get(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(area_id): Path<String>,
                 Query(search): Query<SearchRequest>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake((area_id, search))
                        .handle(|dto| async move {
                            module.handler().get_members_of_area(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(area_id): Path<String>,
                 Json(req): Json<CreateMemberRequest>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake((area_id, req))
                        .handle(|dto| async move { module.handler().create_member(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/areas/:area_id/members/next-reference",
            get(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(area_id): Path<String>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake(NextReferenceRequest::new(area_id))
                        .handle(|dto| async move {
                            module.handler().get_next_reference(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/areas/:area_id/payments",
            get(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(area_id): Path<String>,
                 Query(search): Query<SearchRequest>| async move {
                    Controller::new(PaymentTransformer, PaymentPresenter)
                        .intake(PaymentsOfAreaRequest::new(area_id, search))
                        .handle(|dto| async move {
                            module.handler().get_payments_of_area(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
