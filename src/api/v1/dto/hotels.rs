/*
 * Responsibility
 * - Hotels request/response DTOs
 * - Wire names are PascalCase (`UserId`, `FileName`, ...), the shape existing clients read
 * - AddHotelForm::validate() turns raw form text into typed fields before any I/O
 *   (userId must be present, price/rating must be integers, name/city are taken as sent)
 */
use serde::Serialize;

use crate::repos::Hotel;
use crate::services::form::FormData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotelResponse {
    pub user_id: String,
    pub id: String,
    pub price: i32,
    pub rating: i32,
    pub name: String,
    pub city: String,
    pub file_name: String,
}

impl From<Hotel> for HotelResponse {
    fn from(h: Hotel) -> Self {
        Self {
            user_id: h.owner_id,
            id: h.id,
            price: h.price,
            rating: h.rating,
            name: h.name,
            city: h.city,
            file_name: h.file_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotelsResponse {
    pub hotels: Vec<HotelResponse>,
}

/// Text fields of the add-hotel multipart form, as received.
#[derive(Debug, Clone, Default)]
pub struct AddHotelForm {
    pub name: Option<String>,
    pub rating: Option<String>,
    pub city: Option<String>,
    pub price: Option<String>,
    pub user_id: Option<String>,
    pub id_token: Option<String>,
}

/// Typed fields ready to become a Hotel record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidHotelFields {
    pub owner_id: String,
    pub name: String,
    pub city: String,
    pub price: i32,
    pub rating: i32,
}

impl AddHotelForm {
    pub fn from_form(form: &FormData) -> Self {
        let get = |name: &str| form.field(name).map(str::to_string);
        Self {
            name: get("name"),
            rating: get("rating"),
            city: get("city"),
            price: get("price"),
            user_id: get("userId"),
            id_token: get("idToken"),
        }
    }

    pub fn validate(&self) -> Result<ValidHotelFields, String> {
        Ok(ValidHotelFields {
            owner_id: required("userId", &self.user_id)?,
            // Free text is kept as sent; an absent field is stored empty.
            name: self.name.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            price: integer("price", &self.price)?,
            rating: integer("rating", &self.rating)?,
        })
    }
}

/// Present and not blank; the value itself is returned untouched.
fn required(field: &str, value: &Option<String>) -> Result<String, String> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(format!("{field} is required")),
    }
}

fn integer(field: &str, value: &Option<String>) -> Result<i32, String> {
    let raw = value
        .as_deref()
        .ok_or_else(|| format!("{field} is required"))?;
    raw.trim()
        .parse::<i32>()
        .map_err(|_| format!("{field} is not an integer: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str, rating: &str) -> AddHotelForm {
        AddHotelForm {
            name: Some("Harbour View".into()),
            rating: Some(rating.into()),
            city: Some("Sydney".into()),
            price: Some(price.into()),
            user_id: Some("alice".into()),
            id_token: Some("t".into()),
        }
    }

    #[test]
    fn numeric_text_becomes_integers() {
        let valid = form("120", "4").validate().unwrap();

        assert_eq!(valid.price, 120);
        assert_eq!(valid.rating, 4);
        assert_eq!(valid.owner_id, "alice");
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let err = form("cheap", "4").validate().unwrap_err();
        assert!(err.starts_with("price"));
    }

    #[test]
    fn non_numeric_rating_is_rejected() {
        let err = form("120", "4.5").validate().unwrap_err();
        assert!(err.starts_with("rating"));
    }

    #[test]
    fn missing_owner_is_rejected() {
        let mut f = form("120", "4");
        f.user_id = None;

        assert_eq!(f.validate().unwrap_err(), "userId is required");
    }

    #[test]
    fn blank_owner_is_rejected() {
        let mut f = form("120", "4");
        f.user_id = Some("   ".into());

        assert_eq!(f.validate().unwrap_err(), "userId is required");
    }

    #[test]
    fn text_fields_are_kept_as_sent() {
        let mut f = form("120", "4");
        f.user_id = Some(" alice ".into());
        f.name = Some("  Harbour View  ".into());

        let valid = f.validate().unwrap();

        assert_eq!(valid.owner_id, " alice ");
        assert_eq!(valid.name, "  Harbour View  ");
        assert_eq!(valid.city, "Sydney");
    }

    #[test]
    fn missing_name_and_city_are_stored_empty() {
        let mut f = form("120", "4");
        f.name = None;
        f.city = None;

        let valid = f.validate().unwrap();

        assert_eq!(valid.name, "");
        assert_eq!(valid.city, "");
    }

    #[test]
    fn response_uses_wire_names() {
        let body = HotelsResponse {
            hotels: vec![HotelResponse::from(Hotel {
                owner_id: "alice".into(),
                id: "id-1".into(),
                name: "Harbour View".into(),
                city: "Sydney".into(),
                price: 120,
                rating: 4,
                file_name: "harbour.jpg".into(),
            })],
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "Hotels": [{
                    "UserId": "alice",
                    "Id": "id-1",
                    "Price": 120,
                    "Rating": 4,
                    "Name": "Harbour View",
                    "City": "Sydney",
                    "FileName": "harbour.jpg",
                }]
            })
        );
    }
}
