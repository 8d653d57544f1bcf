use super::{Change, Subsystem, WriteAction, diff_int, diff_text};
use crate::detect::NetworkState;
use crate::profile::TargetValues;
use crate::sysfs::paths;

pub(super) fn diff(state: &NetworkState, target: &TargetValues, out: &mut Vec<Change>) {
    diff_text(
        out,
        Subsystem::Network,
        "TCP Congestion",
        paths::TCP_CONGESTION,
        state.congestion.as_deref(),
        target.tcp_congestion,
    );

    let ints = [
        ("TCP Fast Open", paths::TCP_FASTOPEN, state.fastopen, target.tcp_fastopen),
        (
            "TCP MTU Probing",
            paths::TCP_MTU_PROBING,
            state.mtu_probing,
            target.tcp_mtu_probing,
        ),
        ("Recv Buffer Max", paths::NET_RMEM_MAX, state.rmem_max, target.rmem_max),
        ("Send Buffer Max", paths::NET_WMEM_MAX, state.wmem_max, target.wmem_max),
    ];
    for (parameter, path, observed, wanted) in ints {
        diff_int(out, Subsystem::Network, parameter, path, observed, wanted);
    }

    diff_triplet(
        out,
        "TCP Recv Buffers",
        paths::TCP_RMEM,
        state.tcp_rmem.as_deref(),
        target.tcp_rmem,
    );
    diff_triplet(
        out,
        "TCP Send Buffers",
        paths::TCP_WMEM,
        state.tcp_wmem.as_deref(),
        target.tcp_wmem,
    );
}

/// `min default max` buffer sizes. Compared field by field as integers so
/// tabs versus spaces never produce a spurious change; unparsable content
/// falls back to whitespace-normalized text.
fn diff_triplet(
    out: &mut Vec<Change>,
    parameter: &str,
    path: &str,
    observed: Option<&str>,
    target: &str,
) {
    let Some(current) = observed else {
        return;
    };
    let current = normalize(current);
    let target = normalize(target);
    let equal = match (parse_fields(&current), parse_fields(&target)) {
        (Some(a), Some(b)) => a == b,
        _ => current == target,
    };
    if !equal {
        out.push(Change::new(
            Subsystem::Network,
            parameter,
            current,
            target.clone(),
            WriteAction::Text {
                path: path.to_string(),
                value: target,
            },
        ));
    }
}

fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_fields(s: &str) -> Option<Vec<i64>> {
    s.split_whitespace().map(|f| f.parse().ok()).collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::profile::{PowerState, ProfileType};

    fn desktop() -> TargetValues {
        TargetValues::for_profile(ProfileType::Desktop, PowerState::Ac)
    }

    fn run(state: &NetworkState) -> Vec<Change> {
        let mut out = Vec::new();
        diff(state, &desktop(), &mut out);
        out
    }

    #[test]
    fn tab_separated_triplet_matches_target() {
        let state = NetworkState {
            tcp_rmem: Some("4096\t131072\t67108864".to_string()),
            tcp_wmem: Some("4096  131072 67108864".to_string()),
            ..NetworkState::default()
        };
        assert!(run(&state).is_empty());
    }

    #[test]
    fn differing_triplet_records_normalized_old_value() {
        let state = NetworkState {
            tcp_rmem: Some("4096\t131072\t6291456".to_string()),
            ..NetworkState::default()
        };
        let out = run(&state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].old_value(), "4096 131072 6291456");
        assert_eq!(out[0].new_value(), "4096 131072 67108864");
        assert_eq!(out[0].backup_value(), "4096 131072 6291456");
    }

    #[test]
    fn integers_compare_numerically() {
        let state = NetworkState {
            fastopen: Some(3),
            mtu_probing: Some(0),
            rmem_max: Some(212_992),
            ..NetworkState::default()
        };
        let params: Vec<String> = run(&state)
            .iter()
            .map(|c| c.parameter().to_string())
            .collect();
        assert_eq!(params, vec!["TCP MTU Probing", "Recv Buffer Max"]);
    }

    #[test]
    fn congestion_change_comes_first() {
        let state = NetworkState {
            congestion: Some("cubic".to_string()),
            wmem_max: Some(1),
            ..NetworkState::default()
        };
        let out = run(&state);
        assert_eq!(out[0].to_string(), "TCP Congestion: cubic → bbr");
        assert_eq!(out[1].parameter(), "Send Buffer Max");
    }

    #[test]
    fn unparsable_triplet_compares_as_text() {
        let state = NetworkState {
            tcp_wmem: Some("4096 131072 67108864 extra".to_string()),
            ..NetworkState::default()
        };
        assert_eq!(run(&state).len(), 1);
    }
}
