use keel::Event;
use keel::MAX_EVENT_SIZE;
use keel::PROGRAM_DATA_PREFIX;
use keel::Tag;
use keel::base64::Engine;
use keel::base64::engine::general_purpose::STANDARD;
use keel::borsh::BorshSerialize;
use keel::emit_with_tag_to;
use keel::parse_program_data;

#[derive(BorshSerialize)]
#[borsh(crate = "keel::borsh")]
pub struct SimpleEvent {
	pub count: u64,
	pub flag: bool,
}

keel::event!(SimpleEvent);

#[derive(BorshSerialize)]
#[borsh(crate = "keel::borsh")]
pub struct Blob {
	pub bytes: Vec<u8>,
}

keel::event!(Blob);

#[test]
fn simple_event_record_layout() {
	let mut sink: Vec<Vec<u8>> = Vec::new();
	SimpleEvent {
		count: 42,
		flag: true,
	}
	.emit_to(&mut sink);

	let mut expected = vec![0x48, 0x67, 0x74, 0x85, 0x85, 0x6f, 0x84, 0xe5];
	expected.extend_from_slice(&42u64.to_le_bytes());
	expected.push(0x01);
	assert_eq!(sink, vec![expected]);
}

#[test]
fn events_at_the_limit_are_published() {
	let mut sink: Vec<Vec<u8>> = Vec::new();
	// tag + u32 length prefix + bytes
	Blob {
		bytes: vec![1; MAX_EVENT_SIZE - 8 - 4],
	}
	.emit_to(&mut sink);
	assert_eq!(sink.len(), 1);
	assert_eq!(sink[0].len(), MAX_EVENT_SIZE);
}

#[test]
fn events_past_the_limit_are_dropped() {
	let mut sink: Vec<Vec<u8>> = Vec::new();
	Blob {
		bytes: vec![1; MAX_EVENT_SIZE - 8 - 3],
	}
	.emit_to(&mut sink);
	Blob {
		bytes: vec![1; 2000],
	}
	.emit_to(&mut sink);
	assert!(sink.is_empty());
}

#[test]
fn caller_supplied_tag_is_used_verbatim() {
	let mut sink: Vec<Vec<u8>> = Vec::new();
	let legacy = Tag::new([1, 2, 3, 4, 5, 6, 7, 8]);
	emit_with_tag_to(&mut sink, legacy, &SimpleEvent {
		count: 1,
		flag: false,
	});

	assert_eq!(sink.len(), 1);
	assert_eq!(&sink[0][..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
	assert_eq!(sink[0].len(), 8 + 9);
}

#[test]
fn program_data_round_trip() {
	let mut sink: Vec<Vec<u8>> = Vec::new();
	SimpleEvent {
		count: 7,
		flag: true,
	}
	.emit_to(&mut sink);

	let line = format!("{PROGRAM_DATA_PREFIX}{}", STANDARD.encode(&sink[0]));
	let parsed = parse_program_data(&line)
		.unwrap_or_else(|e| panic!("{e}"))
		.unwrap_or_else(|| panic!("line should carry data"));
	assert_eq!(parsed, sink[0]);
	assert!(SimpleEvent::tag().matches(&parsed));
}
