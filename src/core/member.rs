//! Membership business logic - profiles, room membership, and approval.
//!
//! A room is the set of approved profiles whose `admin_id` points at one
//! admin plus that admin's own profile. Identity itself comes from the
//! external auth provider; this module only manages the membership rows.

use crate::{
    config::settings::Settings,
    entities::{Profile as ProfileEntity, profile},
    errors::{Error, Result},
};
use sea_orm::{Condition, DatabaseConnection, QueryOrder, Set, prelude::*};

/// Verifies that `caller` is the admin of the room identified by `admin_id`.
///
/// # Errors
/// Returns [`Error::AdminRequired`] otherwise.
pub fn ensure_room_admin(caller: &profile::Model, admin_id: &str) -> Result<()> {
    if caller.is_admin() && caller.user_id == admin_id {
        Ok(())
    } else {
        Err(Error::AdminRequired {
            user_id: caller.user_id.clone(),
        })
    }
}

/// Creates a room admin profile.
///
/// # Errors
/// Returns [`Error::MissingField`] for an empty name and database errors.
pub async fn register_admin(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    mobile_number: Option<String>,
) -> Result<profile::Model> {
    if name.trim().is_empty() {
        return Err(Error::MissingField { field: "name" });
    }

    let model = profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        admin_id: Set(None),
        name: Set(name.trim().to_string()),
        mobile_number: Set(mobile_number),
        approved: Set(true),
        daily_food_budget: Set(None),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates an unapproved member profile requesting to join the room whose
/// admin code is `admin_id`. The member is not "in" the room until the
/// admin approves.
///
/// # Errors
/// Returns [`Error::MissingField`] for an empty name and database errors.
pub async fn request_join(
    db: &DatabaseConnection,
    admin_id: &str,
    user_id: &str,
    name: &str,
    mobile_number: Option<String>,
) -> Result<profile::Model> {
    if name.trim().is_empty() {
        return Err(Error::MissingField { field: "name" });
    }

    let model = profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        admin_id: Set(Some(admin_id.to_string())),
        name: Set(name.trim().to_string()),
        mobile_number: Set(mobile_number),
        approved: Set(false),
        daily_food_budget: Set(None),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Finds a profile by its auth identity.
///
/// # Errors
/// Returns database errors.
pub async fn find_by_user_id(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<profile::Model>> {
    ProfileEntity::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All members of a room: the admin plus every approved member, ordered by
/// name.
///
/// # Errors
/// Returns database errors.
pub async fn room_members(db: &DatabaseConnection, admin_id: &str) -> Result<Vec<profile::Model>> {
    ProfileEntity::find()
        .filter(
            Condition::any()
                .add(profile::Column::UserId.eq(admin_id))
                .add(profile::Column::AdminId.eq(admin_id)),
        )
        .filter(profile::Column::Approved.eq(true))
        .order_by_asc(profile::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Members awaiting approval for a room.
///
/// # Errors
/// Returns database errors.
pub async fn pending_members(
    db: &DatabaseConnection,
    admin_id: &str,
) -> Result<Vec<profile::Model>> {
    ProfileEntity::find()
        .filter(profile::Column::AdminId.eq(admin_id))
        .filter(profile::Column::Approved.eq(false))
        .order_by_asc(profile::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Approves a pending member into the caller's room. Admin only.
///
/// # Errors
/// Returns [`Error::AdminRequired`] for non-admin callers and
/// [`Error::ProfileNotFound`] when no such member requested to join.
pub async fn approve_member(
    db: &DatabaseConnection,
    caller: &profile::Model,
    member_user_id: &str,
) -> Result<profile::Model> {
    let member = find_by_user_id(db, member_user_id)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: member_user_id.to_string(),
        })?;

    let room = member.admin_id.clone().unwrap_or_default();
    ensure_room_admin(caller, &room)?;

    let mut model: profile::ActiveModel = member.into();
    model.approved = Set(true);
    model.update(db).await.map_err(Into::into)
}

/// Removes a member's profile from the room. Admin only. Their personal
/// expenses remain theirs; only the membership row goes away.
///
/// # Errors
/// Returns [`Error::AdminRequired`] for non-admin callers and
/// [`Error::ProfileNotFound`] for a missing member.
pub async fn remove_member(
    db: &DatabaseConnection,
    caller: &profile::Model,
    member_user_id: &str,
) -> Result<()> {
    let member = find_by_user_id(db, member_user_id)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: member_user_id.to_string(),
        })?;

    let room = member.admin_id.clone().unwrap_or_default();
    ensure_room_admin(caller, &room)?;

    member.delete(db).await?;
    Ok(())
}

/// The room's daily food budget: the admin profile's value when set,
/// otherwise the configured default.
///
/// # Errors
/// Returns database errors.
pub async fn daily_food_budget(
    db: &DatabaseConnection,
    settings: &Settings,
    admin_id: &str,
) -> Result<f64> {
    let admin = find_by_user_id(db, admin_id).await?;
    Ok(admin
        .and_then(|p| p.daily_food_budget)
        .unwrap_or(settings.daily_food_budget))
}

/// Sets the room's daily food budget on the admin profile. Admin only.
///
/// # Errors
/// Returns [`Error::AdminRequired`] for non-admin callers,
/// [`Error::InvalidAmount`] for non-positive budgets, and database errors.
pub async fn set_daily_food_budget(
    db: &DatabaseConnection,
    caller: &profile::Model,
    budget: f64,
) -> Result<profile::Model> {
    if !caller.is_admin() {
        return Err(Error::AdminRequired {
            user_id: caller.user_id.clone(),
        });
    }
    if !budget.is_finite() || budget <= 0.0 {
        return Err(Error::InvalidAmount { amount: budget });
    }

    let admin = find_by_user_id(db, &caller.user_id)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: caller.user_id.clone(),
        })?;

    let mut model: profile::ActiveModel = admin.into();
    model.daily_food_budget = Set(Some(budget));
    model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_room_members_excludes_unapproved_and_other_rooms() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;
        create_test_member(&db, "admin", "member1", "Ravi").await?;
        request_join(&db, "admin", "member2", "Divya", None).await?;
        create_test_admin(&db, "other_admin").await?;

        let members = room_members(&db, "admin").await?;
        let ids: Vec<&str> = members.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"admin"));
        assert!(ids.contains(&"member1"));

        let pending = pending_members(&db, "admin").await?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].user_id, "member2");

        // Approval brings the member in
        approve_member(&db, &admin, "member2").await?;
        assert_eq!(room_members(&db, "admin").await?.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_requires_that_rooms_admin() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_admin(&db, "admin").await?;
        let stranger = create_test_admin(&db, "other_admin").await?;
        request_join(&db, "admin", "member1", "Ravi", None).await?;

        let result = approve_member(&db, &stranger, "member1").await;
        assert!(matches!(result.unwrap_err(), Error::AdminRequired { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_member() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;
        create_test_member(&db, "admin", "member1", "Ravi").await?;

        remove_member(&db, &admin, "member1").await?;
        assert!(find_by_user_id(&db, "member1").await?.is_none());

        let result = remove_member(&db, &admin, "member1").await;
        assert!(matches!(result.unwrap_err(), Error::ProfileNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_daily_food_budget_default_and_override() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = Settings::default();
        let admin = create_test_admin(&db, "admin").await?;

        // Unset budget falls back to the configured default
        assert_eq!(daily_food_budget(&db, &settings, "admin").await?, 120.0);

        set_daily_food_budget(&db, &admin, 150.0).await?;
        assert_eq!(daily_food_budget(&db, &settings, "admin").await?, 150.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_budget_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;
        let room_member = create_test_member(&db, "admin", "member1", "Ravi").await?;

        let result = set_daily_food_budget(&db, &room_member, 100.0).await;
        assert!(matches!(result.unwrap_err(), Error::AdminRequired { .. }));

        let result = set_daily_food_budget(&db, &admin, 0.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: 0.0 }
        ));

        Ok(())
    }

    #[test]
    fn test_ensure_room_admin() {
        let admin = stub_profile("admin", None, "Admin", true);
        let room_member = stub_profile("member1", Some("admin"), "Ravi", true);

        assert!(ensure_room_admin(&admin, "admin").is_ok());
        assert!(ensure_room_admin(&admin, "other_admin").is_err());
        assert!(ensure_room_admin(&room_member, "admin").is_err());
    }
}
