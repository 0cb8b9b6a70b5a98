//! Tests for producers driven by closure policies

#[cfg(test)]
mod tests {
    use crate::producer::{EventProducer, ExtractResult, FnPolicy, MemoryCell};

    #[tokio::test]
    async fn test_fn_policy_with_different_input_and_output_types() {
        // Sum of pending amounts, delivered as a single formatted total
        let policy = FnPolicy::new(
            |amount: u32, total: &u32| total + amount,
            |total: &u32| {
                if *total == 0 {
                    ExtractResult::Empty
                } else {
                    ExtractResult::Produced {
                        element: format!("total={}", total),
                        new_state: 0,
                    }
                }
            },
        );
        let producer = EventProducer::new(policy, MemoryCell::new(0u32));

        assert_eq!(producer.consume().await.unwrap(), None);

        producer.send(3).await.unwrap();
        producer.send(4).await.unwrap();

        assert_eq!(producer.consume().await.unwrap(), Some("total=7".to_string()));
        assert_eq!(producer.consume().await.unwrap(), None);
        assert_eq!(producer.snapshot().await.unwrap(), 0);
    }
}
