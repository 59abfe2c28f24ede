use crate::{
    common_models::session::{Session, SessionUser},
    gateway::{
        error::GatewayError,
        model::{Direction, Query},
    },
    http_client::Response,
};

use super::dto::{ErrorBodyDTO, TokenResponseDTO};

impl From<TokenResponseDTO> for Session {
    fn from(value: TokenResponseDTO) -> Self {
        Self {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
            user: SessionUser {
                id: value.user.id,
                email: value.user.email,
            },
        }
    }
}

pub(super) fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.to_owned())];

    params.extend(
        query
            .equals
            .iter()
            .map(|(column, value)| (column.to_owned(), format!("eq.{value}"))),
    );

    if let Some(order) = &query.order {
        let direction = match order.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        params.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }

    params
}

pub(super) fn check_status(response: Response) -> Result<Response, GatewayError> {
    if response.status.is_success() {
        return Ok(response);
    }

    Err(GatewayError::Status {
        status: response.status.0,
        message: error_message(&response),
    })
}

fn error_message(response: &Response) -> String {
    let body: ErrorBodyDTO = response.json().unwrap_or_default();

    body.message
        .or(body.msg)
        .or(body.error_description)
        .or(body.error)
        .or_else(|| {
            String::from_utf8(response.body.to_owned())
                .ok()
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}

pub(super) fn decode_error(error: impl std::fmt::Display) -> GatewayError {
    GatewayError::Decode(error.to_string())
}
