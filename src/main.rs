mod config;
mod error;
mod handlers;
mod http;
mod images;
mod models;
mod notify;
mod store;
#[cfg(test)]
mod testing;

use lambda_http::{run, service_fn, Body, Request, Response};
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sns::Client as SnsClient;

use config::Config;
use error::TicketError;
use handlers::{handle_create_ticket, handle_delete_ticket, handle_list_tickets, handle_update_ticket, AppClients};
use http::{error_response, handle_options, parse_json_body, success_response, unsupported_method_response};
use images::S3ImageStore;
use models::{CreateTicketRequest, DeleteTicketRequest, UpdateTicketRequest};
use notify::SnsNotifier;
use store::DynamoTicketStore;

/// Route a request on its HTTP method alone; there is a single resource.
async fn dispatch(method: &str, body: &Body, clients: &AppClients) -> Result<Response<Body>, TicketError> {
    match method {
        // Handle CORS preflight requests
        "OPTIONS" => Ok(handle_options()),
        "POST" => {
            let req: CreateTicketRequest = parse_json_body(body, method)?;
            let created = handle_create_ticket(req, clients).await?;
            Ok(success_response(201, &created))
        }
        "GET" => {
            let tickets = handle_list_tickets(clients).await?;
            Ok(success_response(200, &tickets))
        }
        "PUT" => {
            let req: UpdateTicketRequest = parse_json_body(body, method)?;
            let updated = handle_update_ticket(req, clients).await?;
            Ok(success_response(200, &updated))
        }
        "DELETE" => {
            let req: DeleteTicketRequest = parse_json_body(body, method)?;
            let deleted = handle_delete_ticket(req, clients).await?;
            Ok(success_response(200, &deleted))
        }
        other => Ok(unsupported_method_response(other)),
    }
}

/// Handle the Lambda event
///
/// Every failure, bad input or AWS fault alike, comes back as a 500 carrying the error text.
async fn handle_lambda_event(event: Request, clients: &AppClients) -> Response<Body> {
    let method = event.method().as_str();

    match dispatch(method, event.body(), clients).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(method, error = %e, "Ticket request failed");
            error_response(
                500,
                &e.to_string(),
                "An unexpected error occurred while handling the ticket request.",
                Some("Check the Lambda logs for more details."),
            )
        }
    }
}

/// Main Lambda handler function
async fn function_handler(event: Request, clients: &AppClients) -> Result<Response<Body>, lambda_http::Error> {
    Ok(handle_lambda_event(event, clients).await)
}

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    lambda_http::tracing::init_default_subscriber();

    let config = Config::from_env()?;

    // Initialize AWS config and clients once; warm invocations reuse them
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let clients = AppClients::new(
        Box::new(DynamoTicketStore::new(DynamoDbClient::new(&aws_config), config.table_name)),
        Box::new(S3ImageStore::new(S3Client::new(&aws_config), config.bucket_name)),
        Box::new(SnsNotifier::new(SnsClient::new(&aws_config), config.topic_arn)),
    );

    run(service_fn(|event| function_handler(event, &clients))).await
}
