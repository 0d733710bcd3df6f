//! Input rules checked before a request leaves the client.
//!
//! These are stricter than the server's: names and free text have display
//! length limits, and restaurant websites and phones are pattern-checked.
//! Blank optional values become `null` on the wire.

use std::sync::LazyLock;

use bitebook_core::{
  contact::NewContact,
  restaurant::{Coordinates, NewRestaurant, Restaurant, RestaurantPatch},
  validate::{ValidationErrors, is_australian_mobile},
};
use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern")
});

static AU_LANDLINE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?:\+61[ -]?|0)[2378](?:[ -]?[0-9]){8}$").expect("landline pattern")
});

static WEBSITE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$")
    .expect("website pattern")
});

fn too_long(value: &str, max: usize) -> bool { value.chars().count() > max }

/// `None` for a blank value, otherwise the value with surrounding
/// whitespace removed.
fn optional(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn check_length(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
  if too_long(value, max) {
    errors.push(field, format!("Max {max} characters"));
  }
}

// ─── Contact form ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub phone:      String,
  pub notes:      String,
}

impl ContactForm {
  pub fn validate(&self) -> Result<NewContact, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let first_name = self.first_name.trim();
    if first_name.is_empty() {
      errors.push("first_name", "First name is required");
    }
    check_length(&mut errors, "first_name", first_name, 20);

    let last_name = self.last_name.trim();
    if last_name.is_empty() {
      errors.push("last_name", "Last name is required");
    }
    check_length(&mut errors, "last_name", last_name, 20);

    let email = self.email.trim();
    if email.is_empty() {
      errors.push("email", "Email is required");
    } else if !EMAIL.is_match(email) {
      errors.push("email", "Enter a valid email address");
    }

    let phone = self.phone.trim();
    if phone.is_empty() {
      errors.push("phone", "Phone number is required");
    } else if !is_australian_mobile(phone) {
      errors.push("phone", "Enter a valid phone number");
    }

    if too_long(&self.notes, 1000) {
      errors.push("notes", "Message is too long");
    }

    if !errors.is_empty() {
      return Err(errors);
    }
    Ok(NewContact {
      first_name: first_name.to_owned(),
      last_name:  last_name.to_owned(),
      email:      email.to_owned(),
      phone:      phone.to_owned(),
      notes:      optional(&self.notes),
    })
  }
}

// ─── Restaurant form ─────────────────────────────────────────────────────────

/// The rating and review half of the restaurant form, shown for visited
/// restaurants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewSection {
  /// 1–5 stars; 0 means no rating was picked.
  pub rating: u8,
  pub review: String,
}

impl ReviewSection {
  pub fn rating(&self) -> Option<u8> { (self.rating > 0).then_some(self.rating) }

  /// Trimmed review text; `None` when blank.
  pub fn review(&self) -> Option<String> { optional(&self.review) }
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantForm {
  pub name:        String,
  pub address:     String,
  pub coordinates: Option<Coordinates>,
  pub phone:       String,
  pub website:     String,
  pub description: String,
  /// `None` when the form is shown without its review section.
  pub review:      Option<ReviewSection>,
}

/// An edit ready for [`crate::pipeline::save_restaurant`].
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantEdit {
  pub fields: RestaurantPatch,
  pub review: Option<ReviewSection>,
}

impl RestaurantForm {
  /// Prefill the form from a stored restaurant.
  pub fn from_restaurant(r: &Restaurant, include_review: bool) -> Self {
    Self {
      name:        r.name.clone(),
      address:     r.address.clone().unwrap_or_default(),
      coordinates: r.coordinates,
      phone:       r.phone.clone().unwrap_or_default(),
      website:     r.website.clone().unwrap_or_default(),
      description: r.description.clone().unwrap_or_default(),
      review:      include_review.then(|| ReviewSection {
        rating: r.rating.unwrap_or(0),
        review: r.review.clone().unwrap_or_default(),
      }),
    }
  }

  fn check(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = self.name.trim();
    if name.is_empty() {
      errors.push("name", "Restaurant name is required");
    }
    check_length(&mut errors, "name", name, 100);
    check_length(&mut errors, "address", self.address.trim(), 200);

    let phone = self.phone.trim();
    check_length(&mut errors, "phone", phone, 20);
    if !phone.is_empty() && !is_australian_mobile(phone) && !AU_LANDLINE.is_match(phone) {
      errors.push("phone", "Enter a valid phone number");
    }

    let website = self.website.trim();
    check_length(&mut errors, "website", website, 200);
    if !website.is_empty() && !WEBSITE.is_match(website) {
      errors.push("website", "Invalid website URL");
    }

    check_length(&mut errors, "description", self.description.trim(), 500);

    if let Some(section) = &self.review {
      if section.rating > 5 {
        errors.push("rating", "Rating must be between 1 and 5");
      }
      check_length(&mut errors, "review", section.review.trim(), 2000);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
  }

  /// Body for creating a restaurant. Rating and review ride along only when
  /// the review section is shown; a zero rating and a blank review are sent
  /// as `null`.
  pub fn to_new(&self) -> Result<NewRestaurant, ValidationErrors> {
    self.check()?;
    Ok(NewRestaurant {
      name:        self.name.trim().to_owned(),
      address:     optional(&self.address),
      coordinates: self.coordinates,
      phone:       optional(&self.phone),
      website:     optional(&self.website),
      description: optional(&self.description),
      rating:      self.review.as_ref().and_then(ReviewSection::rating),
      review:      self.review.as_ref().and_then(ReviewSection::review),
    })
  }

  /// Edit for an existing restaurant. Every text field is sent; coordinates
  /// are left unchanged when the form has none.
  pub fn to_edit(&self) -> Result<RestaurantEdit, ValidationErrors> {
    self.check()?;
    Ok(RestaurantEdit {
      fields: RestaurantPatch {
        name:        Some(self.name.trim().to_owned()),
        address:     Some(optional(&self.address)),
        coordinates: self.coordinates.map(Some),
        phone:       Some(optional(&self.phone)),
        website:     Some(optional(&self.website)),
        description: Some(optional(&self.description)),
      },
      review: self.review.clone(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn jane() -> ContactForm {
    ContactForm {
      first_name: "Jane".into(),
      last_name:  "Doe".into(),
      email:      "jane@x.com".into(),
      phone:      "0412 345 678".into(),
      notes:      String::new(),
    }
  }

  #[test]
  fn valid_contact_form_sends_null_notes() {
    let c = jane().validate().unwrap();
    assert_eq!(c.first_name, "Jane");
    assert_eq!(c.phone, "0412 345 678");
    assert_eq!(c.notes, None);
  }

  #[test]
  fn contact_names_are_capped_at_twenty() {
    let form = ContactForm { first_name: "A".repeat(21), ..jane() };
    let err = form.validate().unwrap_err();
    assert!(err.has("first_name"));
    assert!(!err.has("last_name"));
  }

  #[test]
  fn contact_form_reports_every_bad_field() {
    let err = ContactForm::default().validate().unwrap_err();
    for field in ["first_name", "last_name", "email", "phone"] {
      assert!(err.has(field), "{field}");
    }
    assert!(!err.has("notes"));
  }

  #[test]
  fn contact_form_rejects_landline() {
    let form = ContactForm { phone: "0398765432".into(), ..jane() };
    assert!(form.validate().unwrap_err().has("phone"));
  }

  #[test]
  fn contact_form_email_pattern() {
    for email in ["jane@x", "jane x@y.com", "@x.com"] {
      let form = ContactForm { email: email.into(), ..jane() };
      assert!(form.validate().unwrap_err().has("email"), "{email}");
    }
  }

  fn tipo() -> RestaurantForm {
    RestaurantForm {
      name: "Tipo 00".into(),
      address: "361 Little Bourke St".into(),
      website: "https://tipo00.com.au".into(),
      phone: "03 9942 3946".into(),
      ..Default::default()
    }
  }

  #[test]
  fn restaurant_form_accepts_landline_and_mobile() {
    for phone in ["03 9942 3946", "+61 3 9942 3946", "0412345678", ""] {
      let form = RestaurantForm { phone: phone.into(), ..tipo() };
      assert!(form.to_new().is_ok(), "{phone}");
    }
    let form = RestaurantForm { phone: "0112345678".into(), ..tipo() };
    assert!(form.to_new().unwrap_err().has("phone"));
  }

  #[test]
  fn restaurant_form_checks_website() {
    for site in ["tipo00.com.au", "http://example.org/menu"] {
      let form = RestaurantForm { website: site.into(), ..tipo() };
      assert!(form.to_new().is_ok(), "{site}");
    }
    let form = RestaurantForm { website: "not a url".into(), ..tipo() };
    assert!(form.to_new().unwrap_err().has("website"));
  }

  #[test]
  fn restaurant_form_limits() {
    let form = RestaurantForm { description: "x".repeat(501), ..tipo() };
    assert!(form.to_new().unwrap_err().has("description"));

    let form = RestaurantForm {
      review: Some(ReviewSection { rating: 6, review: String::new() }),
      ..tipo()
    };
    assert!(form.to_new().unwrap_err().has("rating"));
  }

  #[test]
  fn new_restaurant_omits_review_unless_section_shown() {
    let new = tipo().to_new().unwrap();
    assert_eq!(new.rating, None);
    assert_eq!(new.review, None);
    assert_eq!(new.description, None);

    let form = RestaurantForm {
      review: Some(ReviewSection { rating: 0, review: "  Great gnocchi  ".into() }),
      ..tipo()
    };
    let new = form.to_new().unwrap();
    assert_eq!(new.rating, None);
    assert_eq!(new.review.as_deref(), Some("Great gnocchi"));
  }

  #[test]
  fn edit_leaves_missing_coordinates_unchanged() {
    let edit = tipo().to_edit().unwrap();
    assert_eq!(edit.fields.coordinates, None);
    assert_eq!(edit.fields.description, Some(None));
    assert_eq!(edit.fields.name.as_deref(), Some("Tipo 00"));

    let form = RestaurantForm {
      coordinates: Some(Coordinates { lng: 144.96, lat: -37.81 }),
      ..tipo()
    };
    let edit = form.to_edit().unwrap();
    assert_eq!(edit.fields.coordinates, Some(Some(Coordinates { lng: 144.96, lat: -37.81 })));
  }
}
