use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{CollectionTransformer, YearlyHistoryRequest};
use crate::response::{CollectionPresenter, DailyCollectionResponse};
use crate::session::Authenticated;
use application::service::{GetCollectionService, WatchCollectionService};
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;

pub trait CollectionRouter {
    fn route_collection(self) -> Self;
}

impl CollectionRouter for Router<AppModule> {
    fn route_collection(self) -> Self {
        self.route(
            "/collections/today",
            get(
                |State(module): State<AppModule>, _: Authenticated| async move {
                    Controller::new((), CollectionPresenter)
                        .bypass(|| async move { module.handler().get_daily_collection().await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/collections/today/stream",
            get(
                |State(module): State<AppModule>, _: Authenticated| async move {
                    let watch = module
                        .handler()
                        .watch_daily_collection()
                        .await
                        .map_err(ErrorStatus::from)?;
                    // One event per committed payment change, starting with the current total.
                    let stream = futures_util::stream::unfold(
                        (module, watch),
                        |(module, mut watch)| async move {
                            match module.handler().next_daily_collection(&mut watch).await {
                                Ok(total) => {
                                    let event = Event::default()
                                        .event("daily-collection")
                                        .json_data(DailyCollectionResponse::from(total));
                                    Some((event, (module, watch)))
                                }
                                Err(report) => {
                                    tracing::error!("daily collection stream closed: {report:?}");
                                    None
                                }
                            }
                        },
                    );
                    Ok::<_, ErrorStatus>(Sse::new(stream).keep_alive(KeepAlive::default()))
                },
            ),
        )
        .route(
            "/collections/month",
            get(
                |State(module): State<AppModule>, _: Authenticated| async move {
                    Controller::new((), CollectionPresenter)
                        .bypass(|| async move { module.handler().get_monthly_collection().await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/collections/history/:year",
            get(
                |State(module): State<AppModule>,
                 _: Authenticated,
                 Path(year): Path<i32>| async move {
                    Controller::new(CollectionTransformer, CollectionPresenter)
                        .intake(YearlyHistoryRequest::new(year))
                        .handle(|dto| async move { module.handler().get_yearly_history(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
