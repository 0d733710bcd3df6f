//! Plain-text renderings of the contact and restaurant lists.

use std::fmt::Write as _;

use bitebook_core::{
  contact::Contact,
  restaurant::{Restaurant, partition},
};

/// Notes longer than this are cut in the contact table.
pub const NOTES_PREVIEW_CHARS: usize = 20;

fn truncate(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    return s.to_owned();
  }
  let mut cut: String = s.chars().take(max).collect();
  cut.push('…');
  cut
}

fn table_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
  let mut text = String::new();
  for (cell, w) in cells.zip(widths) {
    let pad = w.saturating_sub(cell.chars().count());
    let _ = write!(text, "{cell}{}  ", " ".repeat(pad));
  }
  out.push_str(text.trim_end());
  out.push('\n');
}

/// Left-aligned columns separated by two spaces. Widths count chars.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
  let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
  for row in rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  table_row(&mut out, headers.iter().copied(), &widths);
  for row in rows {
    table_row(&mut out, row.iter().map(String::as_str), &widths);
  }
  out
}

// ─── Contacts ────────────────────────────────────────────────────────────────

/// Contact requests sorted by id.
pub fn contact_table(contacts: &[Contact]) -> String {
  if contacts.is_empty() {
    return "No contact requests.\n".to_owned();
  }

  let mut sorted: Vec<&Contact> = contacts.iter().collect();
  sorted.sort_by_key(|c| c.id);

  let rows: Vec<Vec<String>> = sorted
    .into_iter()
    .map(|c| {
      vec![
        c.id.to_string(),
        c.full_name(),
        c.email.clone(),
        c.phone.clone(),
        c.notes
          .as_deref()
          .map_or_else(|| "-".to_owned(), |n| truncate(n, NOTES_PREVIEW_CHARS)),
        if c.verified { "Verified" } else { "Pending" }.to_owned(),
      ]
    })
    .collect();

  table(&["ID", "Name", "Email", "Phone", "Notes", "Status"], &rows)
}

// ─── Restaurants ─────────────────────────────────────────────────────────────

/// Five stars, filled up to `rating`.
pub fn stars(rating: Option<u8>) -> String {
  let filled = usize::from(rating.unwrap_or(0).min(5));
  format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn restaurant_line(out: &mut String, r: &Restaurant) {
  let _ = write!(out, "  [{}] {}", r.id, r.name);
  if let Some(address) = &r.address {
    let _ = write!(out, ", {address}");
  }
  out.push('\n');
}

/// The restaurant list split into "Want to visit" and "Visited".
pub fn restaurant_lists(restaurants: &[Restaurant]) -> String {
  let split = partition(restaurants);
  let mut out = String::new();

  let _ = writeln!(out, "Want to visit ({})", split.want_to_visit.len());
  if split.want_to_visit.is_empty() {
    out.push_str("  (none)\n");
  }
  for r in &split.want_to_visit {
    restaurant_line(&mut out, r);
  }

  out.push('\n');
  let _ = writeln!(out, "Visited ({})", split.visited.len());
  if split.visited.is_empty() {
    out.push_str("  (none)\n");
  }
  for r in &split.visited {
    restaurant_line(&mut out, r);
    let _ = writeln!(out, "      {}", stars(r.rating));
    if let Some(review) = &r.review {
      let _ = writeln!(out, "      \"{review}\"");
    }
  }
  out
}

/// Every stored field of one restaurant.
pub fn restaurant_detail(r: &Restaurant) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{} (#{})", r.name, r.id);
  let fields = [
    ("Address", r.address.clone()),
    ("Phone", r.phone.clone()),
    ("Website", r.website.clone()),
    ("Description", r.description.clone()),
    ("Location", r.coordinates.map(|c| format!("{:.5}, {:.5}", c.lat, c.lng))),
    ("Rating", r.rating.map(|n| stars(Some(n)))),
    ("Review", r.review.clone()),
  ];
  for (label, value) in fields {
    if let Some(value) = value {
      let _ = writeln!(out, "  {label:<12}{value}");
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use bitebook_core::Status;
  use chrono::Utc;

  use super::*;

  fn contact(id: i64, notes: Option<&str>, verified: bool) -> Contact {
    let now = Utc::now();
    Contact {
      id,
      created_time: now,
      updated_time: now,
      status: Status::Enabled,
      first_name: "Jane".into(),
      last_name: format!("Doe{id}"),
      email: "jane@x.com".into(),
      phone: "0412345678".into(),
      notes: notes.map(str::to_owned),
      verified,
    }
  }

  fn restaurant(id: i64, rating: Option<u8>, review: Option<&str>) -> Restaurant {
    let now = Utc::now();
    Restaurant {
      id,
      created_time: now,
      updated_time: now,
      status: Status::Enabled,
      name: format!("Place {id}"),
      address: None,
      coordinates: None,
      phone: None,
      website: None,
      description: None,
      rating,
      review: review.map(str::to_owned),
    }
  }

  #[test]
  fn contact_table_sorts_by_id_and_truncates_notes() {
    let long = "Please call after five on weekdays";
    let out = contact_table(&[contact(3, None, true), contact(1, Some(long), false)]);
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].starts_with("ID"));
    assert!(lines[1].starts_with("1 "));
    assert!(lines[2].starts_with("3 "));
    assert!(lines[1].contains("Please call after fi…"));
    assert!(!lines[1].contains(long));
    assert!(lines[1].ends_with("Pending"));
    assert!(lines[2].ends_with("Verified"));
  }

  #[test]
  fn empty_contact_table() {
    assert_eq!(contact_table(&[]), "No contact requests.\n");
  }

  #[test]
  fn stars_fill_to_rating() {
    assert_eq!(stars(Some(3)), "★★★☆☆");
    assert_eq!(stars(None), "☆☆☆☆☆");
    assert_eq!(stars(Some(5)), "★★★★★");
  }

  #[test]
  fn restaurant_lists_split_on_review() {
    let out = restaurant_lists(&[
      restaurant(1, None, None),
      restaurant(2, Some(4), Some("Great")),
      restaurant(3, Some(2), None),
    ]);
    let (want, visited) = out.split_once("Visited").unwrap();

    assert!(want.contains("Want to visit (2)"));
    assert!(want.contains("[1] Place 1"));
    assert!(want.contains("[3] Place 3"));
    assert!(visited.starts_with(" (1)"));
    assert!(visited.contains("[2] Place 2"));
    assert!(visited.contains("★★★★☆"));
    assert!(visited.contains("\"Great\""));
  }
}
