use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{
    delete, get, post, put, web, HttpRequest, HttpResponse, Responder, ResponseError,
};
use log::{error, info};
use serde_json::json;

use crate::config::ErrorDetail;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::model::ServiceRequest;
use crate::store::{ServiceStore, StoreError};

pub struct AppState {
    store: Arc<dyn ServiceStore>,
    error_detail: ErrorDetail,
}

impl AppState {
    pub fn new(store: Arc<dyn ServiceStore>, error_detail: ErrorDetail) -> Self {
        AppState {
            store,
            error_detail,
        }
    }

    fn persistence_error(&self, message: &str, err: StoreError) -> ApiError {
        error!("{message}: {err}");
        ApiError::Persistence {
            message: message.to_string(),
            detail: self.error_detail.reveal(&err),
        }
    }
}

/// Registers the API metadata route, the `/api` scope and the JSON body and
/// path error mapping.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid request body: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid path parameter: {err}")).into()
    }))
    .service(index)
    .service(
        web::scope("/api")
            .service(add_service)
            .service(get_services)
            .service(search_services)
            .service(search_without_vehicle)
            .service(get_service_by_id)
            .service(update_service)
            .service(delete_service_by_id),
    );
}

/// Rewrites any 5xx response not produced by an `ApiError` into the
/// `Internal server error` envelope.
pub fn error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler_server(unmapped_server_error)
}

fn unmapped_server_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let mapped = res
        .response()
        .error()
        .is_some_and(|err| err.as_error::<ApiError>().is_some());
    if mapped {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let cause = match res.response().error() {
        Some(err) => err.to_string(),
        None => res.status().to_string(),
    };
    error!("unhandled error on {} {}: {cause}", res.request().method(), res.request().path());

    let error_detail = res
        .request()
        .app_data::<web::Data<AppState>>()
        .map_or(ErrorDetail::Hide, |state| state.error_detail);
    let api_error = ApiError::Internal {
        detail: error_detail.reveal(&cause),
    };

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, api_error.error_response()).map_into_right_body();
    Ok(ErrorHandlerResponse::Response(res))
}

pub async fn route_not_found(req: HttpRequest) -> impl Responder {
    info!("no route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(Envelope::failure("Route not found", None))
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Vehicle Service Management System API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/services": "Get all services",
            "POST /api/services": "Add new service",
            "GET /api/services/search/{vehicle_no}": "Search service by vehicle number",
            "GET /api/services/{id}": "Get service by id",
            "PUT /api/services/{id}": "Update service",
            "DELETE /api/services/{id}": "Delete service"
        }
    }))
}

/// Path ids must be positive integers; anything else is treated as absent.
fn parse_service_id(raw: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::Validation("Service ID is required".to_string())),
    }
}

#[post("/services")]
async fn add_service(
    data: web::Data<AppState>,
    request: web::Json<ServiceRequest>,
) -> Result<HttpResponse, ApiError> {
    let fields = request.into_inner().into_fields()?;

    let service = data
        .store
        .create(&fields)
        .await
        .map_err(|err| data.persistence_error("Failed to add service", err))?;

    info!(
        "service {} added for vehicle {}",
        service.service_id, service.vehicle_no
    );
    Ok(HttpResponse::Created().json(Envelope::with_message("Service added successfully", service)))
}

#[get("/services")]
async fn get_services(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let services = data
        .store
        .list_all()
        .await
        .map_err(|err| data.persistence_error("Failed to fetch services", err))?;

    Ok(HttpResponse::Ok().json(Envelope::data(services)))
}

#[get("/services/search/{vehicle_no}")]
async fn search_services(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let vehicle_no = path.into_inner();
    let vehicle_no = vehicle_no.trim();
    if vehicle_no.is_empty() {
        return Err(ApiError::Validation("Vehicle number is required".to_string()));
    }

    let services = data
        .store
        .search_by_vehicle(vehicle_no)
        .await
        .map_err(|err| data.persistence_error("Failed to search service", err))?;

    Ok(HttpResponse::Ok().json(Envelope::data(services)))
}

#[get("/services/search")]
async fn search_without_vehicle() -> Result<HttpResponse, ApiError> {
    Err(ApiError::Validation("Vehicle number is required".to_string()))
}

#[get("/services/{id}")]
async fn get_service_by_id(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let service_id = parse_service_id(&path)?;

    let service = data
        .store
        .get(service_id)
        .await
        .map_err(|err| data.persistence_error("Failed to fetch service", err))?;

    match service {
        Some(service) => Ok(HttpResponse::Ok().json(Envelope::data(service))),
        None => Err(ApiError::not_found()),
    }
}

#[put("/services/{id}")]
async fn update_service(
    data: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<ServiceRequest>,
) -> Result<HttpResponse, ApiError> {
    let service_id = parse_service_id(&path)?;
    let fields = request.into_inner().into_fields()?;

    let service = data
        .store
        .update(service_id, &fields)
        .await
        .map_err(|err| data.persistence_error("Failed to update service", err))?;

    match service {
        Some(service) => {
            info!("service {service_id} updated");
            Ok(HttpResponse::Ok().json(Envelope::with_message("Service updated successfully", service)))
        }
        None => Err(ApiError::not_found()),
    }
}

#[delete("/services/{id}")]
async fn delete_service_by_id(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let service_id = parse_service_id(&path)?;

    let deleted_rows = data
        .store
        .delete(service_id)
        .await
        .map_err(|err| data.persistence_error("Failed to delete service", err))?;

    if deleted_rows == 0 {
        return Err(ApiError::not_found());
    }

    info!("service {service_id} deleted");
    Ok(HttpResponse::Ok().json(Envelope::message("Service deleted successfully")))
}
