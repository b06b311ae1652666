use haven_op_router::{Event, NO_TOOL, reduce};
use proptest::prelude::*;

const FALLBACK: &str = "fallback";

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        ("[a-z_]{1,12}", ".{0,20}").prop_map(|(name, text)| Event::tool(name, text)),
        ".{0,20}".prop_map(Event::agent),
    ]
}

proptest! {
    #[test]
    fn final_response_is_last_nonempty_agent_text(events in prop::collection::vec(arb_event(), 0..16)) {
        let expected = events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::Agent { text } if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| FALLBACK.to_string());
        prop_assert_eq!(reduce(&events, FALLBACK).final_response, expected);
    }

    #[test]
    fn tool_called_is_last_tool_name(events in prop::collection::vec(arb_event(), 0..16)) {
        let expected = events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::Tool { capability_name, .. } => Some(capability_name.clone()),
                _ => None,
            })
            .unwrap_or_else(|| NO_TOOL.to_string());
        prop_assert_eq!(reduce(&events, FALLBACK).tool_called, expected);
    }

    #[test]
    fn reduce_is_idempotent(events in prop::collection::vec(arb_event(), 0..16)) {
        prop_assert_eq!(reduce(&events, FALLBACK), reduce(&events, FALLBACK));
    }

    #[test]
    fn final_response_never_empty(events in prop::collection::vec(arb_event(), 0..16)) {
        prop_assert!(!reduce(&events, FALLBACK).final_response.is_empty());
    }
}
