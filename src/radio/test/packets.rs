use super::fixtures::Bench;
use crate::config::{HeaderMode, TxPolling};
use crate::Error;

const RX_DONE: u8 = 0x40;
const CRC_ERROR: u8 = 0x20;
const VALID_HEADER: u8 = 0x10;

#[test]
fn send_stages_payload_and_waits_for_tx_done() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    radio.send_text("hello").unwrap();

    let chip = bench.chip.borrow();
    assert_eq!(&chip.fifo[..5], b"hello");
    assert_eq!(chip.reg(0x22), 5);
    assert_eq!(chip.reg(0x1D) & 0x01, 0);
    assert_eq!(chip.writes_to(0x01), [0x81, 0x83]);
    // cleared before transmit, then acknowledged
    assert_eq!(chip.writes_to(0x12), [0x08, 0x08]);
    assert_eq!(chip.reg(0x12), 0);
}

#[test]
fn oversized_payload_is_truncated() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    let payload: Vec<u8> = (0..300).map(|i| i as u8).collect();

    radio.send_buffer(&payload).unwrap();

    let chip = bench.chip.borrow();
    assert_eq!(chip.reg(0x22), 255);
    assert_eq!(chip.writes_to(0x00).len(), 255);
    assert_eq!(&chip.fifo[..255], &payload[..255]);
}

#[test]
fn incremental_writes_stop_at_fifo_limit() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    radio.begin_packet().unwrap();
    assert_eq!(radio.write(&[0xAA; 200]), Ok(200));
    assert_eq!(radio.write(&[0xBB; 100]), Ok(55));
    assert_eq!(radio.write(&[0xCC]), Ok(0));
    assert_eq!(bench.chip.borrow().reg(0x22), 255);

    radio.end_packet().unwrap();
}

#[test]
fn empty_send_is_ignored() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    radio.send_buffer(&[]).unwrap();
    assert!(bench.chip.borrow().writes.is_empty());
}

#[test]
fn missing_tx_done_times_out_into_standby() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().tx_completes = false;
    radio.set_tx_polling(TxPolling {
        interval_ms: 10,
        timeout_ms: 50,
    });

    assert_eq!(radio.send_text("lost"), Err(Error::TxTimeout));
    assert_eq!(bench.chip.borrow().mode(), 0x01);
    assert_eq!(bench.elapsed_ms(), 450 + 50);
}

#[test]
fn late_tx_done_does_not_complete_next_send() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().tx_completes = false;
    radio.set_tx_polling(TxPolling {
        interval_ms: 10,
        timeout_ms: 50,
    });

    assert_eq!(radio.send_text("first"), Err(Error::TxTimeout));
    assert_eq!(bench.chip.borrow().reg(0x12) & 0x08, 0);

    // first packet finishes after the driver gave up
    bench.chip.borrow_mut().registers[0x12] |= 0x08;

    assert_eq!(radio.send_text("second"), Err(Error::TxTimeout));
    assert_eq!(bench.chip.borrow().reg(0x12) & 0x08, 0);
    assert_eq!(bench.elapsed_ms(), 450 + 50 + 50);
}

#[test]
fn tx_done_at_end_of_budget_is_seen() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    {
        let mut chip = bench.chip.borrow_mut();
        chip.tx_completes = false;
        chip.tx_done_at_poll = Some(2);
    }
    radio.set_tx_polling(TxPolling {
        interval_ms: 10,
        timeout_ms: 10,
    });

    assert_eq!(radio.send_text("edge"), Ok(()));
    assert_eq!(bench.elapsed_ms(), 450 + 10);
    assert_eq!(bench.chip.borrow().mode(), 0x03);
}

#[test]
fn send_recovers_after_timeout() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().tx_completes = false;
    radio.set_tx_polling(TxPolling {
        interval_ms: 10,
        timeout_ms: 50,
    });

    assert_eq!(radio.send_text("lost"), Err(Error::TxTimeout));

    bench.chip.borrow_mut().tx_completes = true;
    assert_eq!(radio.send_text("found"), Ok(()));
    let chip = bench.chip.borrow();
    assert_eq!(&chip.fifo[..5], b"found");
    assert_eq!(chip.reg(0x22), 5);
    assert_eq!(chip.reg(0x12), 0);
}

#[test]
fn slow_settings_wait_for_full_airtime() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    radio.set_spreading_factor(12).unwrap();
    radio.set_bandwidth(7_800).unwrap();
    {
        let mut chip = bench.chip.borrow_mut();
        chip.tx_completes = false;
        // about 145 s after entering transmit
        chip.tx_done_at_poll = Some(14_500);
    }

    assert_eq!(radio.send_buffer(&[0x55; 255]), Ok(()));
    assert_eq!(bench.elapsed_ms(), 450 + 144_990);
}

#[test]
fn explicit_header_packet_is_read_byte_by_byte() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench
        .chip
        .borrow_mut()
        .deliver(0x20, b"hello", RX_DONE | VALID_HEADER);

    assert_eq!(radio.try_receive(0), Ok(5));
    {
        let chip = bench.chip.borrow();
        assert_eq!(chip.reg(0x12), 0);
        assert_eq!(chip.reg(0x0D), 0x20);
        assert_eq!(chip.mode(), 0x01);
    }
    assert_eq!(radio.configuration().header_mode, HeaderMode::Explicit);
    assert_eq!(radio.available(), 5);

    let mut received = Vec::new();
    while let Some(byte) = radio.read_byte().unwrap() {
        received.push(byte);
    }
    assert_eq!(received, b"hello");
    assert_eq!(radio.available(), 0);
    assert_eq!(radio.read_byte(), Ok(None));
}

#[test]
fn implicit_header_uses_expected_length() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().deliver(0x00, &[1, 2, 3, 4], RX_DONE);

    assert_eq!(radio.try_receive(4), Ok(4));
    {
        let chip = bench.chip.borrow();
        assert_eq!(chip.reg(0x22), 4);
        assert_eq!(chip.reg(0x1D) & 0x01, 0x01);
    }
    assert_eq!(radio.configuration().header_mode, HeaderMode::Implicit);
    assert_eq!(radio.read_byte(), Ok(Some(1)));
    assert_eq!(radio.available(), 3);
}

#[test]
fn last_receive_header_mode_applies_to_next_send() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    radio.try_receive(8).unwrap();
    radio.send_text("fixed").unwrap();
    assert_eq!(bench.chip.borrow().reg(0x1D) & 0x01, 0x01);

    radio.try_receive(0).unwrap();
    radio.send_text("free").unwrap();
    assert_eq!(bench.chip.borrow().reg(0x1D) & 0x01, 0x00);
}

#[test]
fn crc_error_discards_packet_and_listens() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench
        .chip
        .borrow_mut()
        .deliver(0x00, b"junk", RX_DONE | CRC_ERROR);

    assert_eq!(radio.try_receive(0), Ok(0));
    let chip = bench.chip.borrow();
    assert_eq!(chip.reg(0x12), 0);
    assert_eq!(chip.mode(), 0x06);
    assert_eq!(chip.reg(0x0D), 0x00);
    assert_eq!(radio.available(), 0);
}

#[test]
fn no_packet_enters_single_receive_once() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    assert_eq!(radio.try_receive(0), Ok(0));
    assert_eq!(bench.chip.borrow().mode(), 0x06);
    assert_eq!(bench.chip.borrow().writes_to(0x01), [0x86]);

    // already listening
    assert_eq!(radio.try_receive(0), Ok(0));
    assert_eq!(bench.chip.borrow().writes_to(0x01), [0x86]);
}

#[test]
fn continuous_receive_counts_as_listening() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().registers[0x01] = 0x85;

    assert_eq!(radio.try_receive(0), Ok(0));
    assert!(bench.chip.borrow().writes_to(0x01).is_empty());
}

#[test]
fn peek_does_not_consume() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().deliver(0x10, b"ab", RX_DONE);
    radio.try_receive(0).unwrap();

    assert_eq!(radio.peek_byte(), Ok(Some(b'a')));
    assert_eq!(radio.peek_byte(), Ok(Some(b'a')));
    assert_eq!(radio.available(), 2);
    assert_eq!(radio.read_byte(), Ok(Some(b'a')));
    assert_eq!(radio.peek_byte(), Ok(Some(b'b')));
    assert_eq!(radio.read_byte(), Ok(Some(b'b')));
    assert_eq!(radio.peek_byte(), Ok(None));
}

#[test]
fn read_buffer_fills_what_fits() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().deliver(0x00, b"hello", RX_DONE);

    let mut buffer = [0u8; 3];
    assert_eq!(radio.read_buffer(&mut buffer), Ok(3));
    assert_eq!(&buffer, b"hel");
    assert_eq!(radio.available(), 2);
    assert_eq!(radio.read_byte(), Ok(Some(b'l')));
}

#[test]
fn read_buffer_without_packet_returns_zero() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    let mut buffer = [0u8; 8];
    assert_eq!(radio.read_buffer(&mut buffer), Ok(0));
    assert_eq!(bench.chip.borrow().mode(), 0x06);
}

#[test]
fn read_text_returns_utf8_payload() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().deliver(0x00, "grüße".as_bytes(), RX_DONE);

    let mut buffer = [0u8; 32];
    assert_eq!(radio.read_text(&mut buffer), Ok(Some("grüße")));
    assert_eq!(radio.available(), 0);
}

#[test]
fn read_text_rejects_invalid_utf8() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();
    bench.chip.borrow_mut().deliver(0x00, &[0x68, 0xFF, 0x69], RX_DONE);

    let mut buffer = [0u8; 8];
    assert_eq!(radio.read_text(&mut buffer), Ok(None));
    assert_eq!(&buffer[..3], &[0x68, 0xFF, 0x69]);
}

#[test]
fn read_text_without_packet_is_none() {
    let bench = Bench::new();
    let mut radio = bench.ready_radio();

    let mut buffer = [0u8; 8];
    assert_eq!(radio.read_text(&mut buffer), Ok(None));
}
