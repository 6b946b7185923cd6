use std::net::UdpSocket;
use std::thread;
use std::time::Duration;
use stun_latency::client::Result;
use stun_latency::client::{
    measurement_phase, run_session, LatencyHistogram, NoProgress, Reporter, Statistics,
    StunSocket, UdpStunSocket, NO_SUCCESSFUL_REQUESTS,
};
use stun_latency::protocol::{binding_success, decode};

/// Test helper: bind a responder on an ephemeral port
fn start_test_server() -> UdpSocket {
    UdpSocket::bind("127.0.0.1:0").expect("Failed to bind test server")
}

/// Test helper: answer `count` binding requests, skipping those where
/// `drop_request(i)` is true
fn run_stun_server(server: UdpSocket, count: usize, drop_request: fn(usize) -> bool) {
    let mut buf = [0u8; 512];
    for i in 0..count {
        let Ok((len, peer)) = server.recv_from(&mut buf) else {
            return;
        };
        if drop_request(i) {
            continue;
        }
        if let Ok(request) = decode(&buf[..len]) {
            if let Ok(response) = binding_success(request.transaction_id, peer) {
                let _ = server.send_to(&response.raw, peer);
            }
        }
    }
}

#[test]
fn test_end_to_end_measurement() -> Result<()> {
    let server = start_test_server();
    let addr = server.local_addr()?;
    let handle = thread::spawn(move || run_stun_server(server, 10, |_| false));

    let socket = UdpStunSocket::connect(&addr.to_string())?;
    let outcomes = run_session(socket, 10, Duration::from_secs(2), &mut NoProgress);

    assert_eq!(outcomes.len(), 10);
    assert!(outcomes.iter().all(|o| o.is_success()));

    let stats = Statistics::new(&outcomes);
    assert_eq!(stats.success_count(), 10);
    assert_eq!(stats.failure_count(), 0);
    assert!(stats.first_request_us().is_some());

    let rendered = Reporter::render_results(&stats);
    assert!(rendered.contains("Successful requests: 10"));
    assert!(rendered.contains("Failed requests: 0"));

    let histogram = LatencyHistogram::new(stats.samples()).expect("samples present");
    let total: usize = histogram.buckets().iter().map(|b| b.count).sum();
    assert_eq!(total, 10);

    handle.join().unwrap();
    Ok(())
}

#[test]
fn test_measurement_continues_after_timeouts() -> Result<()> {
    let server = start_test_server();
    let addr = server.local_addr()?;
    // Requests 0 and 3 go unanswered
    let handle = thread::spawn(move || run_stun_server(server, 5, |i| i == 0 || i == 3));

    let mut socket = UdpStunSocket::connect(&addr.to_string())?;
    let outcomes = measurement_phase(&mut socket, 5, Duration::from_millis(200), &mut NoProgress);
    socket.close()?;

    let pattern: Vec<bool> = outcomes.iter().map(|o| o.is_success()).collect();
    assert_eq!(pattern, vec![false, true, true, false, true]);

    let stats = Statistics::new(&outcomes);
    assert_eq!(stats.success_count() + stats.failure_count(), 5);
    assert_eq!(stats.first_request_us(), None);
    assert!(!Reporter::render_results(&stats).contains("First request time"));

    handle.join().unwrap();
    Ok(())
}

#[test]
fn test_silent_server_reports_no_successes() -> Result<()> {
    let server = start_test_server();
    let socket = UdpStunSocket::connect(&server.local_addr()?.to_string())?;

    let outcomes = run_session(socket, 2, Duration::from_millis(50), &mut NoProgress);
    let stats = Statistics::new(&outcomes);

    assert_eq!(stats.failure_count(), 2);
    assert_eq!(Reporter::render_results(&stats), NO_SUCCESSFUL_REQUESTS);
    assert!(LatencyHistogram::new(stats.samples()).is_none());
    Ok(())
}

#[test]
fn test_unresolvable_host_is_a_setup_error() {
    assert!(UdpStunSocket::connect("stun.invalid:3478").is_err());
}
