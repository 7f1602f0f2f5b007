fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use tokio::sync::mpsc;

    use rectran_protocol::{ChunkMessage, PATH_METADATA, TransferMetadata};
    use rectran_receiver::{InboundMessage, ReceiveEvent, ReceiverConfig, ReceiverHandle};
    use rectran_sender::{PeerTransport, SendError, SenderConfig, TransferSender};

    // --- Wire fixtures ---
    //
    // Verbatim payload shapes exchanged by the mobile apps. These pin
    // the JSON contract: camelCase keys, base64 chunk data, all fields
    // required.

    #[test]
    fn fixture_metadata_from_watch_app() {
        let json = br#"{"fileName":"recording_20240101_120000.m4a","totalChunks":3,"fileSize":250000,"timestamp":1704110400000}"#;
        let meta = TransferMetadata::decode(json).unwrap();
        assert_eq!(meta.file_name, "recording_20240101_120000.m4a");
        assert_eq!(meta.total_chunks, 3);
        assert_eq!(meta.file_size, 250_000);
        assert_eq!(meta.timestamp, 1_704_110_400_000);
    }

    #[test]
    fn fixture_chunk_from_watch_app() {
        let json = br#"{"chunkIndex":0,"data":"SGVsbG8gV2Vhcg==","size":10}"#;
        let chunk = ChunkMessage::decode(json).unwrap();
        assert_eq!(chunk.chunk_index, 0);
        assert_eq!(chunk.data, b"Hello Wear");
        assert_eq!(chunk.size, 10);
    }

    #[test]
    fn metadata_encodes_phone_expected_keys() {
        let meta = TransferMetadata {
            file_name: "rec.m4a".into(),
            total_chunks: 2,
            file_size: 1024,
            timestamp: 1_704_110_400_000,
        };
        let value: serde_json::Value = serde_json::from_slice(&meta.encode().unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for key in ["fileName", "totalChunks", "fileSize", "timestamp"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn chunk_encodes_phone_expected_keys() {
        let chunk = ChunkMessage::new(1, vec![0xDE, 0xAD]);
        let value: serde_json::Value = serde_json::from_slice(&chunk.encode().unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        for key in ["chunkIndex", "data", "size"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        // No line wrapping in the base64 field.
        assert!(!value["data"].as_str().unwrap().contains('\n'));
    }

    // --- End-to-end transport loopback ---

    /// Routes sender messages straight into a receiver's inbound queue,
    /// optionally failing one send by overall ordinal.
    struct LoopbackTransport {
        /// Node id the receiver sees as the message source.
        self_id: String,
        /// Peer id the sender resolves (the phone).
        peer_id: String,
        inbound: mpsc::Sender<InboundMessage>,
        send_count: AtomicU32,
        fail_at: Option<u32>,
        metadata_deliveries: AtomicU32,
    }

    impl LoopbackTransport {
        fn new(inbound: mpsc::Sender<InboundMessage>, fail_at: Option<u32>) -> Self {
            Self {
                self_id: "watch-1".into(),
                peer_id: "phone-1".into(),
                inbound,
                send_count: AtomicU32::new(0),
                fail_at,
                metadata_deliveries: AtomicU32::new(0),
            }
        }
    }

    impl PeerTransport for LoopbackTransport {
        fn connected_peers(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, SendError>> + Send + '_>> {
            Box::pin(async move { Ok(vec![self.peer_id.clone()]) })
        }

        fn send_message(
            &self,
            peer_id: String,
            path: &'static str,
            payload: Vec<u8>,
        ) -> Pin<Box<dyn Future<Output = Result<(), SendError>> + Send + '_>> {
            Box::pin(async move {
                assert_eq!(peer_id, self.peer_id);
                let ordinal = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;
                if self.fail_at == Some(ordinal) {
                    return Err(SendError::Transport("injected send failure".into()));
                }
                if path == PATH_METADATA {
                    self.metadata_deliveries.fetch_add(1, Ordering::SeqCst);
                }
                self.inbound
                    .send(InboundMessage {
                        path: path.to_string(),
                        payload,
                        source_peer: self.self_id.clone(),
                    })
                    .await
                    .map_err(|_| SendError::Transport("receiver gone".into()))
            })
        }
    }

    fn fast_sender_config(chunk_size: usize) -> SenderConfig {
        SenderConfig {
            chunk_size,
            retry_base_delay: Duration::from_millis(5),
            inter_chunk_delay: Duration::from_millis(1),
            settle_delay: Duration::from_millis(1),
            ..SenderConfig::default()
        }
    }

    /// Collects receiver events until the terminal `Completed`.
    async fn await_completion(
        events: &mut mpsc::Receiver<ReceiveEvent>,
    ) -> (Vec<(u32, u32)>, std::path::PathBuf, String) {
        let mut progress = Vec::new();
        loop {
            let event = tokio::time::timeout(Duration::from_secs(10), events.recv())
                .await
                .expect("timed out waiting for receiver event")
                .expect("receiver event channel closed");
            match event {
                ReceiveEvent::Progress {
                    received_chunks,
                    expected_chunks,
                } => progress.push((received_chunks, expected_chunks)),
                ReceiveEvent::Completed { path, source_peer } => {
                    return (progress, path, source_peer);
                }
            }
        }
    }

    #[tokio::test]
    async fn end_to_end_250k_in_three_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let mut handle = ReceiverHandle::spawn(ReceiverConfig::new(dir.path()));
        let mut events = handle.take_events().unwrap();

        let transport = Arc::new(LoopbackTransport::new(handle.inbound(), None));
        let sender = TransferSender::new(transport.clone(), fast_sender_config(100_000));

        let payload: Vec<u8> = (0..250_000u32).map(|i| (i % 251) as u8).collect();
        let attempts = sender.send_file("rec.m4a", &payload).await.unwrap();
        assert_eq!(attempts, 1);
        // Metadata + 3 chunks crossed the wire.
        assert_eq!(transport.send_count.load(Ordering::SeqCst), 4);

        let (progress, path, source_peer) = await_completion(&mut events).await;
        assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(source_peer, "watch-1");
        assert_eq!(path, dir.path().join("rec.m4a"));

        let received = std::fs::read(&path).unwrap();
        assert_eq!(received.len(), 250_000);
        assert_eq!(received, payload);
    }

    #[tokio::test]
    async fn end_to_end_zero_length_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut handle = ReceiverHandle::spawn(ReceiverConfig::new(dir.path()));
        let mut events = handle.take_events().unwrap();

        let transport = Arc::new(LoopbackTransport::new(handle.inbound(), None));
        let sender = TransferSender::new(transport.clone(), fast_sender_config(100_000));

        sender.send_file("empty.m4a", b"").await.unwrap();
        // Only the metadata message was exchanged.
        assert_eq!(transport.send_count.load(Ordering::SeqCst), 1);

        let (progress, path, _) = await_completion(&mut events).await;
        assert!(progress.is_empty());
        assert_eq!(std::fs::read(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn retry_supersedes_partial_session_and_completes() {
        let dir = tempfile::tempdir().unwrap();
        let mut handle = ReceiverHandle::spawn(ReceiverConfig::new(dir.path()));
        let mut events = handle.take_events().unwrap();

        // Attempt 1 delivers metadata and one chunk, then dies on the
        // second chunk (third overall send). Attempt 2 goes through.
        let transport = Arc::new(LoopbackTransport::new(handle.inbound(), Some(3)));
        let sender = TransferSender::new(transport.clone(), fast_sender_config(4));

        let attempts = sender.send_file("rec.m4a", b"0123456789").await.unwrap();
        assert_eq!(attempts, 2);
        // The receiver saw both metadata messages: the second superseded
        // the partial first session.
        assert_eq!(transport.metadata_deliveries.load(Ordering::SeqCst), 2);

        let (progress, path, _) = await_completion(&mut events).await;
        assert_eq!(std::fs::read(&path).unwrap(), b"0123456789");
        // Final progress reflects a full restart from chunk 0.
        assert_eq!(progress.last(), Some(&(3, 3)));

        // No stray partial files remain.
        assert!(!dir.path().join("rec.m4a.part").exists());
    }

    #[tokio::test]
    async fn byte_identity_across_chunk_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let mut handle = ReceiverHandle::spawn(ReceiverConfig::new(dir.path()));
        let mut events = handle.take_events().unwrap();

        let transport = Arc::new(LoopbackTransport::new(handle.inbound(), None));
        let sender = TransferSender::new(transport, fast_sender_config(7));

        // Length deliberately not a multiple of the chunk size.
        let payload: Vec<u8> = (0..1000u32).map(|i| (i * 31 % 256) as u8).collect();
        sender.send_file("odd.m4a", &payload).await.unwrap();

        let (_, path, _) = await_completion(&mut events).await;
        assert_eq!(std::fs::read(&path).unwrap(), payload);
    }
}
