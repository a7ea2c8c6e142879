//! `tonic` server-trait glue: translates the wire request into a
//! [`Coordinator`] call and the request metadata into `is_replication`.

use std::sync::Arc;

use coordinator::{Coordinator, GetOutcome};
use proto::cache_service_server::CacheService;
use proto::{GetRequest, GetResponse, SetRequest, SetResponse};
use tonic::{Request, Response, Status};

pub struct CacheServiceImpl {
    coordinator: Arc<Coordinator>,
}

impl CacheServiceImpl {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self { coordinator }
    }
}

#[tonic::async_trait]
impl CacheService for CacheServiceImpl {
    async fn set(&self, request: Request<SetRequest>) -> Result<Response<SetResponse>, Status> {
        let is_replication = request.metadata().get(proto::REPLICATION_MARKER_KEY).is_some();
        let request = request.into_inner();

        match self
            .coordinator
            .set(&request.key, request.value, is_replication)
            .await
        {
            Ok(()) => Ok(Response::new(SetResponse { success: true })),
            Err(err) => {
                tracing::error!(key = %request.key, error = %err, "set failed");
                Err(Status::internal(err.to_string()))
            }
        }
    }

    async fn get(&self, request: Request<GetRequest>) -> Result<Response<GetResponse>, Status> {
        let request = request.into_inner();
        let response = match self.coordinator.get(&request.key).await {
            GetOutcome::Found(value) => GetResponse { value, found: true },
            GetOutcome::NotFound => GetResponse {
                value: Vec::new(),
                found: false,
            },
        };
        Ok(Response::new(response))
    }
}
