#![cfg(feature = "net")]

use simnet::{
    net::NetBuildError,
    scenarios::{
        announce,
        dual_lan::{self, DualLanConfig, MAX_LAN_NODES, NUM_CLIENTS, STOP_TIME},
    },
    time::SimTime,
};

#[test]
fn announce_fires_ten_times_in_thirty_seconds() {
    let app = announce::run("ada", "12345", announce::DEFAULT_STOP);

    assert_eq!(app.firings.len(), 10);
    for (i, firing) in app.firings.iter().enumerate() {
        assert_eq!(*firing, SimTime::from(3.0 * i as f64));
    }
}

#[test]
fn announce_stop_time_scales_the_firing_count() {
    let app = announce::run("ada", "12345", SimTime::from(7.0));
    // 0s, 3s, 6s
    assert_eq!(app.firings.len(), 3);

    let app = announce::run("ada", "12345", SimTime::from(6.0));
    // The firing at the stop time itself is never handled.
    assert_eq!(app.firings.len(), 2);
}

#[test]
fn dual_lan_completes_all_echo_transactions() {
    let (app, time) = dual_lan::run(&DualLanConfig::default()).unwrap();

    assert_eq!(time, STOP_TIME);
    assert_eq!(app.log.echoed.len(), NUM_CLIENTS);

    // Every served datagram belongs to a prior send of the same client.
    for (client, served_at) in &app.log.served {
        assert!(app
            .log
            .sent
            .iter()
            .any(|(c, sent_at)| c == client && sent_at < served_at));
    }
}

#[test]
fn dual_lan_stagger_is_stable_across_node_counts() {
    let expected = vec![
        SimTime::from(2.0),
        SimTime::from(2.3),
        SimTime::from(2.8),
        SimTime::from(3.0),
    ];

    for (n1, n2) in [(4, 1), (5, 3), (50, 20), (250, 250)] {
        let config = DualLanConfig {
            n_csma1: n1,
            n_csma2: n2,
            ..DualLanConfig::default()
        };
        let (app, _) = dual_lan::run(&config).unwrap();

        let mut starts: Vec<SimTime> = app.log.sent.iter().map(|(_, t)| *t).collect();
        starts.sort();
        assert_eq!(starts, expected, "nCsma1={n1} nCsma2={n2}");
    }
}

#[test]
fn dual_lan_rejects_oversized_segments_without_building() {
    let config = DualLanConfig {
        n_csma1: MAX_LAN_NODES + 1,
        ..DualLanConfig::default()
    };

    match dual_lan::build(&config) {
        Err(NetBuildError::TooManyLanNodes { lan, count, limit }) => {
            assert_eq!(lan, "lan1");
            assert_eq!(count, MAX_LAN_NODES + 1);
            assert_eq!(limit, MAX_LAN_NODES);
        }
        other => panic!("expected a node count rejection, got {other:?}"),
    }
}

#[test]
fn dual_lan_runs_identically_for_identical_configs() {
    let (a, ta) = dual_lan::run(&DualLanConfig::default()).unwrap();
    let (b, tb) = dual_lan::run(&DualLanConfig::default()).unwrap();

    assert_eq!(ta, tb);
    assert_eq!(a.log, b.log);
}
