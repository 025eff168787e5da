//! Validators shared by every resource.

use galley_core::ApiError;
use galley_store::Entity;

use crate::chain::{Exchange, FnValidator};
use crate::payload::{display_value, Payload};

/// Requires `field` to be present and truthy.
///
/// Fails with `"<Kind> must include a <field>."`.
pub fn require_field<E: Entity, P: Payload>(field: &'static str) -> FnValidator<E, P> {
    require_field_as(field, field)
}

/// Like [`require_field`], naming the field as `label` in the message.
pub fn require_field_as<E: Entity, P: Payload>(
    field: &'static str,
    label: &'static str,
) -> FnValidator<E, P> {
    FnValidator::new(format!("has({field})"), move |ex: &mut Exchange<'_, E, P>| {
        if ex.payload.present(field).is_some() {
            Ok(())
        } else {
            Err(ApiError::validation(format!(
                "{} must include a {label}.",
                E::KIND
            )))
        }
    })
}

/// Looks up the record named by route parameter `param`.
///
/// On success the record is attached to [`Exchange::found`](crate::Exchange);
/// otherwise fails 404 with `"<Kind> does not exist: <id>."`.
pub fn entity_exists<E: Entity, P: Payload>(param: &'static str) -> FnValidator<E, P> {
    FnValidator::new("exists", move |ex: &mut Exchange<'_, E, P>| {
        let id = ex.param(param)?;
        match ex.store.find(id) {
            Some(record) => {
                ex.found = Some(record);
                Ok(())
            }
            None => Err(ApiError::not_found_resource(E::KIND, id)),
        }
    })
}

/// Requires a truthy body `id` to equal route parameter `param`.
///
/// An absent or falsy body id passes. `mismatch` receives the body id and
/// the route id and builds the error message.
pub fn route_id_matches<E: Entity, P: Payload>(
    param: &'static str,
    mismatch: fn(&str, &str) -> String,
) -> FnValidator<E, P> {
    FnValidator::new("id-match", move |ex: &mut Exchange<'_, E, P>| {
        let route_id = ex.param(param)?;
        match ex.payload.present("id") {
            None => Ok(()),
            Some(serde_json::Value::String(body_id)) if body_id == route_id => Ok(()),
            Some(body_id) => Err(ApiError::validation(mismatch(
                &display_value(body_id),
                route_id,
            ))),
        }
    })
}
