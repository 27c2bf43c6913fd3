//! # Broadcast over TCP
//!
//! A broadcast gathers one entry per target; unreachable, hung-up and
//! silent targets become absent without holding up the others.

#[cfg(test)]
mod tests {
    use crate::harness::{Behaviour, Network};
    use qc_01_directory::Authority;
    use qc_02_broadcast::{BroadcastChannel, TcpTransport, TransportConfig};
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;

    async fn dead_authority() -> Authority {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        Authority::new([0xDE; 32], "127.0.0.1", port)
    }

    fn channel(timeout: Duration) -> BroadcastChannel<TcpTransport> {
        BroadcastChannel::new(TcpTransport::new(TransportConfig::with_timeout(timeout)))
    }

    #[tokio::test]
    async fn test_one_dead_target_is_absent() {
        let net = Network::honest(2).await;
        let mut targets: Vec<Authority> = net.mintettes.iter().map(|m| m.authority()).collect();
        let dead = dead_authority().await;
        targets.push(dead.clone());

        let gathered = channel(Duration::from_secs(5))
            .broadcast(&targets, "Query 0")
            .await;

        assert_eq!(gathered.len(), 3);
        assert_eq!(gathered.absent_count(), 1);
        assert!(gathered.contains(&dead.id));
        assert_eq!(gathered.get(&dead.id), None);
        for mintette in &net.mintettes {
            let response = gathered.get(&mintette.authority().id).unwrap();
            assert!(response.starts_with("OK "));
            assert_eq!(mintette.requests(), 1);
        }
    }

    #[tokio::test]
    async fn test_hangup_and_rejection() {
        let net = Network::start(&[Behaviour::Hangup, Behaviour::Reject, Behaviour::Honest]).await;
        let targets: Vec<Authority> = net.mintettes.iter().map(|m| m.authority()).collect();

        let gathered = channel(Duration::from_secs(5))
            .broadcast(&targets, "Query 0")
            .await;

        assert_eq!(gathered.get(&targets[0].id), None);
        assert_eq!(gathered.get(&targets[1].id), Some("Error rejected"));
        assert!(gathered.get(&targets[2].id).unwrap().starts_with("OK "));
    }

    #[tokio::test]
    async fn test_silent_target_times_out() {
        let net = Network::start(&[Behaviour::Silent, Behaviour::Honest]).await;
        let targets: Vec<Authority> = net.mintettes.iter().map(|m| m.authority()).collect();

        let started = Instant::now();
        let gathered = channel(Duration::from_millis(300))
            .broadcast(&targets, "Query 0")
            .await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(gathered.absent_count(), 1);
        assert_eq!(gathered.get(&targets[0].id), None);
    }

    #[tokio::test]
    async fn test_slow_targets_run_concurrently() {
        let delay = Duration::from_millis(300);
        let net = Network::start(&[Behaviour::Delay(delay); 4]).await;
        let targets: Vec<Authority> = net.mintettes.iter().map(|m| m.authority()).collect();

        let started = Instant::now();
        let gathered = channel(Duration::from_secs(5))
            .broadcast(&targets, "Query 0")
            .await;

        assert_eq!(gathered.absent_count(), 0);
        assert!(started.elapsed() < delay * 3);
    }
}
