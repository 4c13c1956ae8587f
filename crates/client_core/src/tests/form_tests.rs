use super::*;
use crate::mock_api::sample_product;

#[test]
fn blank_draft_has_no_id_and_no_images() {
    let draft = FormDraft::blank();
    assert_eq!(draft.id(), None);
    assert!(draft.images().is_empty());
    assert!(!draft.is_enabled());
    for field in FormField::ALL {
        assert_eq!(draft.field(field), "");
    }
}

#[test]
fn add_image_stops_at_the_bound() {
    let mut draft = FormDraft::blank();
    for _ in 0..12 {
        draft.add_image();
    }
    assert_eq!(draft.images().len(), MAX_PRODUCT_IMAGES);
    assert!(!draft.can_add_image());
    assert!(!draft.add_image());
}

#[test]
fn remove_image_shifts_later_entries_down() {
    let mut draft = FormDraft::blank();
    for url in ["a", "b", "c"] {
        draft.add_image();
        let last = draft.images().len() - 1;
        draft.set_image(last, url);
    }

    assert!(draft.remove_image(1));
    assert_eq!(draft.images(), ["a".to_string(), "c".to_string()]);
}

#[test]
fn out_of_range_image_edits_are_no_ops() {
    let mut draft = FormDraft::from_product(&sample_product("p1", "Oolong"));
    let before = draft.images().to_vec();

    assert!(!draft.remove_image(before.len()));
    assert!(!draft.remove_image(usize::MAX));
    assert!(!draft.set_image(before.len(), "https://img.example.com/x.png"));
    assert_eq!(draft.images(), before.as_slice());
}

#[test]
fn seeding_from_product_truncates_oversized_image_lists() {
    let mut product = sample_product("p1", "Oolong");
    product.images_url = (0..8).map(|i| format!("https://img.example.com/{i}.png")).collect();

    let draft = FormDraft::from_product(&product);
    assert_eq!(draft.images().len(), MAX_PRODUCT_IMAGES);
    assert_eq!(draft.images()[0], "https://img.example.com/0.png");
}

#[test]
fn unchanged_edit_draft_submits_values_equal_to_product() {
    let product = sample_product("p1", "Oolong");
    let payload = FormDraft::from_product(&product).to_payload().expect("payload");

    assert_eq!(payload.id, Some(product.id.clone()));
    assert_eq!(payload.origin_price, product.origin_price);
    assert_eq!(payload.price, product.price);
    assert_eq!(payload.is_enabled, 1);
    assert_eq!(payload.images_url, product.images_url);
    assert_eq!(payload.image_url, product.image_url);
}

#[test]
fn textual_prices_are_coerced_to_numbers() {
    let mut draft = FormDraft::blank();
    draft.update_field(FormField::OriginPrice, "100");
    draft.update_field(FormField::Price, " 80 ");

    let payload = draft.to_payload().expect("payload");
    assert_eq!(payload.origin_price, 100.0);
    assert_eq!(payload.price, 80.0);
    assert_eq!(payload.is_enabled, 0);
    assert_eq!(payload.id, None);
}

#[test]
fn blank_price_submits_zero() {
    let payload = FormDraft::blank().to_payload().expect("payload");
    assert_eq!(payload.origin_price, 0.0);
    assert_eq!(payload.price, 0.0);
}

#[test]
fn non_numeric_price_is_a_validation_error() {
    let mut draft = FormDraft::blank();
    draft.update_field(FormField::Price, "cheap");

    let err = draft.to_payload().expect_err("must fail");
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "price must be a number");
}

#[test]
fn parses_field_keys() {
    assert_eq!("origin_price".parse::<FormField>(), Ok(FormField::OriginPrice));
    assert_eq!("imageUrl".parse::<FormField>(), Ok(FormField::ImageUrl));
    assert_eq!(
        "colour".parse::<FormField>(),
        Err(UnknownField("colour".to_string()))
    );
    for field in FormField::ALL {
        assert_eq!(field.key().parse::<FormField>(), Ok(field));
    }
}
