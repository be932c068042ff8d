// src/api/http.rs — reqwest implementation of the booking backend contract

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use super::types::{
    AvailabilityQuery, Booking, BookingCreate, GuestBookingCreate, PaymentMode, PaymentRequest,
    RegisterRequest, Service, Stylist, TimeSlot, TokenResponse,
};
use super::BookingApi;
use crate::infra::config::ApiConfig;
use crate::infra::errors::SalonError;

pub struct HttpBookingApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBookingApi {
    pub fn new(config: &ApiConfig) -> Result<Self, SalonError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SalonError::Config(format!("invalid api.base_url: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SalonError> {
        self.base_url
            .join(path)
            .map_err(|e| SalonError::Config(format!("invalid endpoint {path}: {e}")))
    }

    /// Map a non-success response onto the error taxonomy, carrying the
    /// backend's body verbatim so it can be shown to the user unchanged.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SalonError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::CONFLICT => SalonError::Conflict { message },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SalonError::Auth { message },
            _ => SalonError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn register(&self, req: &RegisterRequest) -> Result<(), SalonError> {
        let response = self
            .client
            .post(self.endpoint("/auth/register")?)
            .json(req)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, SalonError> {
        let response = self
            .client
            .post(self.endpoint("/auth/login")?)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        let response = Self::check(response).await?;
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn list_services(&self) -> Result<Vec<Service>, SalonError> {
        let response = self.client.get(self.endpoint("/services/")?).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_stylists(&self) -> Result<Vec<Stylist>, SalonError> {
        let response = self.client.get(self.endpoint("/stylists/")?).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn availability(&self, query: &AvailabilityQuery) -> Result<Vec<TimeSlot>, SalonError> {
        let mut url = self.endpoint("/bookings/availability")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("service_id", &query.service_id.to_string());
            pairs.append_pair("date", &query.date.to_string());
            if let Some(stylist_id) = query.stylist_id {
                pairs.append_pair("stylist_id", &stylist_id.to_string());
            }
        }
        let response = self.client.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_booking(
        &self,
        token: &str,
        req: &BookingCreate,
    ) -> Result<Booking, SalonError> {
        let response = self
            .client
            .post(self.endpoint("/bookings/")?)
            .bearer_auth(token)
            .json(req)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_guest_booking(&self, req: &GuestBookingCreate) -> Result<Booking, SalonError> {
        let response = self
            .client
            .post(self.endpoint("/bookings/guest")?)
            .json(req)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn pay(
        &self,
        token: Option<&str>,
        booking_id: i64,
        req: &PaymentRequest,
        mode: PaymentMode,
    ) -> Result<Booking, SalonError> {
        let path = match mode {
            PaymentMode::Full => format!("/bookings/{booking_id}/pay"),
            PaymentMode::Deposit => format!("/bookings/{booking_id}/pay-deposit"),
        };
        let mut request = self.client.post(self.endpoint(&path)?).json(req);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn cancel(&self, token: &str, booking_id: i64) -> Result<Booking, SalonError> {
        let response = self
            .client
            .put(self.endpoint(&format!("/bookings/{booking_id}/cancel"))?)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>, SalonError> {
        let response = self
            .client
            .get(self.endpoint("/bookings/me")?)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn stylist_schedule(&self, token: &str) -> Result<Vec<Booking>, SalonError> {
        let response = self
            .client
            .get(self.endpoint("/bookings/stylist-schedule")?)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn availability_url_includes_optional_stylist() {
        let api = HttpBookingApi::new(&ApiConfig::default()).unwrap();
        let mut url = api.endpoint("/bookings/availability").unwrap();
        let query = AvailabilityQuery {
            service_id: 3,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            stylist_id: Some(2),
        };
        url.query_pairs_mut()
            .append_pair("service_id", &query.service_id.to_string())
            .append_pair("date", &query.date.to_string())
            .append_pair("stylist_id", &query.stylist_id.unwrap().to_string());
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/bookings/availability?service_id=3&date=2024-06-01&stylist_id=2"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            timeout_seconds: 5,
        };
        assert!(matches!(
            HttpBookingApi::new(&config),
            Err(SalonError::Config(_))
        ));
    }
}
