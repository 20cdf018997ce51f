//! Permission checks over a resolved profile and group memberships.

use chatperms_config::EffectiveSettings;
use chatperms_host::{GroupMembership, UserProfile};
use chatperms_types::GateError;
use chrono::{DateTime, Utc};

/// Built-in groups that bypass the eligibility thresholds, alongside the
/// configured allow group.
const ELEVATED_GROUPS: [&str; 2] = ["administrators", "Global Moderators"];

/// Eligibility then deny-group, in that order; the first failing rule wins.
///
/// A caller is pending threshold when any of reputation, post count, or
/// join date trips its limit and no elevating group membership applies.
/// Only join dates in the future count as suspicious; there is no
/// minimum-age window. The deny group is checked even when eligibility
/// passed.
pub fn check_can_chat(
    profile: &UserProfile,
    groups: &[GroupMembership],
    settings: &EffectiveSettings,
    now: DateTime<Utc>,
) -> Result<(), GateError> {
    let pending = profile.reputation < settings.min_reputation
        || profile.postcount < settings.min_posts
        || profile.joindate > now;
    if pending && !has_elevated_group(groups, settings) {
        return Err(GateError::NotYetEligible(
            settings.chat_not_yet_allowed_message.clone(),
        ));
    }

    if groups
        .iter()
        .any(|group| group.name == settings.deny_chat_group)
    {
        return Err(GateError::AccessDenied(
            settings.chat_denied_message.clone(),
        ));
    }

    Ok(())
}

fn has_elevated_group(groups: &[GroupMembership], settings: &EffectiveSettings) -> bool {
    groups.iter().any(|group| {
        ELEVATED_GROUPS.contains(&group.name.as_str()) || group.name == settings.allow_chat_group
    })
}

/// Identity rule for the read hook: reading another user's messages
/// requires membership in the admin uid set.
pub fn check_read_identity(
    caller_uid: Option<i64>,
    target_uid: Option<i64>,
    settings: &EffectiveSettings,
) -> Result<(), GateError> {
    if caller_uid != target_uid && !caller_uid.is_some_and(|uid| settings.admin_uids.contains(&uid))
    {
        return Err(GateError::AccessForbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile(reputation: i64, postcount: i64, joined_days_ago: i64) -> UserProfile {
        UserProfile {
            uid: 7,
            username: "alice".to_string(),
            reputation,
            postcount,
            joindate: Utc::now() - Duration::days(joined_days_ago),
        }
    }

    fn groups(names: &[&str]) -> Vec<GroupMembership> {
        names
            .iter()
            .map(|name| GroupMembership {
                name: (*name).to_string(),
            })
            .collect()
    }

    fn settings() -> EffectiveSettings {
        EffectiveSettings {
            chat_not_yet_allowed_message: "not yet".to_string(),
            chat_denied_message: "denied".to_string(),
            ..EffectiveSettings::default()
        }
    }

    #[test]
    fn thresholds_met_and_no_deny_group_passes() {
        let result = check_can_chat(&profile(10, 5, 100), &[], &settings(), Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn low_reputation_alone_is_pending() {
        let result = check_can_chat(&profile(3, 50, 100), &[], &settings(), Utc::now());
        assert!(matches!(result, Err(GateError::NotYetEligible(m)) if m == "not yet"));
    }

    #[test]
    fn low_postcount_alone_is_pending() {
        let result = check_can_chat(&profile(50, 1, 100), &[], &settings(), Utc::now());
        assert!(matches!(result, Err(GateError::NotYetEligible(_))));
    }

    #[test]
    fn future_joindate_alone_is_pending() {
        let result = check_can_chat(&profile(50, 50, -2), &[], &settings(), Utc::now());
        assert!(matches!(result, Err(GateError::NotYetEligible(_))));
    }

    #[test]
    fn recent_but_past_joindate_is_fine() {
        // Joined an hour ago: recency alone does not trip the gate.
        let mut profile = profile(50, 50, 0);
        profile.joindate = Utc::now() - Duration::hours(1);
        let result = check_can_chat(&profile, &[], &settings(), Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn elevating_groups_bypass_thresholds() {
        for name in ["administrators", "Global Moderators", "allowChat"] {
            let result = check_can_chat(&profile(0, 0, -5), &groups(&[name]), &settings(), Utc::now());
            assert!(result.is_ok(), "{name} should bypass");
        }
    }

    #[test]
    fn unrelated_group_does_not_bypass() {
        let result = check_can_chat(&profile(0, 0, 100), &groups(&["regulars"]), &settings(), Utc::now());
        assert!(matches!(result, Err(GateError::NotYetEligible(_))));
    }

    #[test]
    fn deny_group_fails_even_when_eligible() {
        let result = check_can_chat(
            &profile(50, 50, 100),
            &groups(&["denyChat"]),
            &settings(),
            Utc::now(),
        );
        assert!(matches!(result, Err(GateError::AccessDenied(m)) if m == "denied"));
    }

    #[test]
    fn eligibility_failure_wins_over_deny() {
        // Pending threshold and deny-listed: the pending rejection fires first.
        let result = check_can_chat(&profile(0, 0, 100), &groups(&["denyChat"]), &settings(), Utc::now());
        assert!(matches!(result, Err(GateError::NotYetEligible(_))));
    }

    #[test]
    fn elevated_but_deny_listed_is_denied() {
        let result = check_can_chat(
            &profile(0, 0, 100),
            &groups(&["administrators", "denyChat"]),
            &settings(),
            Utc::now(),
        );
        assert!(matches!(result, Err(GateError::AccessDenied(_))));
    }

    #[test]
    fn reading_own_messages_is_allowed() {
        assert!(check_read_identity(Some(5), Some(5), &settings()).is_ok());
    }

    #[test]
    fn cross_user_read_without_admin_rights_is_forbidden() {
        let result = check_read_identity(Some(5), Some(6), &settings());
        assert!(matches!(result, Err(GateError::AccessForbidden)));
    }

    #[test]
    fn admin_may_read_other_users() {
        // Default admin set is [1].
        assert!(check_read_identity(Some(1), Some(6), &settings()).is_ok());
    }

    #[test]
    fn missing_uids_compare_equal() {
        assert!(check_read_identity(None, None, &settings()).is_ok());
    }

    #[test]
    fn missing_caller_against_present_target_is_forbidden() {
        let result = check_read_identity(None, Some(6), &settings());
        assert!(matches!(result, Err(GateError::AccessForbidden)));
    }
}
