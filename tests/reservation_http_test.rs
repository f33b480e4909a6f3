use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use ticket_office::core::occupation::DEFAULT_MAX_OCCUPATION_PERCENTAGE;
use ticket_office::{
    HttpBookingReferenceAdapter, HttpTrainDataAdapter, Reservation, TicketOffice, TicketOfficeError,
};
use tokio_test::{assert_err, assert_ok};

fn office(
    train_server: &MockServer,
    reference_server: &MockServer,
) -> Result<TicketOffice<HttpTrainDataAdapter, HttpBookingReferenceAdapter>> {
    Ok(TicketOffice::new(
        HttpTrainDataAdapter::new(&train_server.base_url())?,
        HttpBookingReferenceAdapter::new(&reference_server.base_url())?,
    ))
}

#[tokio::test]
async fn test_reserve_seats_end_to_end() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    let train_data_mock = train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/express_2000");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"seats": {
                "1A": {"coach": "A", "seat_number": "1", "booking_reference": "ref1"},
                "2A": {"coach": "A", "seat_number": "2", "booking_reference": "ref2"},
                "3A": {"coach": "A", "seat_number": "3", "booking_reference": ""},
                "1B": {"coach": "B", "seat_number": "1", "booking_reference": ""},
                "2B": {"coach": "B", "seat_number": "2", "booking_reference": ""},
                "3B": {"coach": "B", "seat_number": "3", "booking_reference": ""}
            }}));
    });

    let reference_mock = reference_server.mock(|when, then| {
        when.method(GET).path("/booking_reference");
        then.status(200).body("75bcd15");
    });

    let reserve_mock = train_server.mock(|when, then| {
        when.method(POST)
            .path("/reserve")
            .x_www_form_urlencoded_tuple("train_id", "express_2000")
            .x_www_form_urlencoded_tuple("seats", r#"["1B","2B"]"#)
            .x_www_form_urlencoded_tuple("booking_reference", "75bcd15");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"train_id": "express_2000", "seats": {}}));
    });

    let office = office(&train_server, &reference_server)?;
    let reservation = office.allocate("express_2000", 2).await?;

    train_data_mock.assert();
    reference_mock.assert();
    reserve_mock.assert();
    assert_eq!(
        reservation,
        Some(Reservation {
            train_id: "express_2000".to_string(),
            seats: vec!["1B".to_string(), "2B".to_string()],
            booking_reference: "75bcd15".to_string(),
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_reserve_returns_json_wire_format() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/express_2000");
        then.status(200).json_body(json!({"seats": {
            "1A": {"coach": "A", "seat_number": "1", "booking_reference": ""},
            "2A": {"coach": "A", "seat_number": "2", "booking_reference": ""}
        }}));
    });
    reference_server.mock(|when, then| {
        when.method(GET).path("/booking_reference");
        then.status(200).body("75bcd15");
    });
    let reserve_mock = train_server.mock(|when, then| {
        when.method(POST).path("/reserve");
        then.status(200).json_body(json!({}));
    });

    let office = office(&train_server, &reference_server)?;
    let json = office.reserve("express_2000", "1").await?;

    reserve_mock.assert();
    assert_eq!(
        json.as_deref(),
        Some(r#"{"train_id":"express_2000","seats":["1A"],"booking_reference":"75bcd15"}"#)
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_booking_reference_is_passed_through() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/express_2000");
        then.status(200).json_body(json!({"seats": {
            "1A": {"coach": "A", "seat_number": "1", "booking_reference": ""},
            "2A": {"coach": "A", "seat_number": "2", "booking_reference": ""}
        }}));
    });
    let reference_mock = reference_server.mock(|when, then| {
        when.method(GET).path("/booking_reference");
        then.status(200).body("");
    });
    let reserve_mock = train_server.mock(|when, then| {
        when.method(POST)
            .path("/reserve")
            .x_www_form_urlencoded_tuple("train_id", "express_2000")
            .x_www_form_urlencoded_tuple("seats", r#"["1A"]"#)
            .x_www_form_urlencoded_tuple("booking_reference", "");
        then.status(200).json_body(json!({}));
    });

    let office = office(&train_server, &reference_server)?;
    let reservation = office.allocate("express_2000", 1).await?;

    reference_mock.assert();
    reserve_mock.assert();
    assert_eq!(
        reservation,
        Some(Reservation {
            train_id: "express_2000".to_string(),
            seats: vec!["1A".to_string()],
            booking_reference: String::new(),
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_train_from_body_without_seats() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    let train_data_mock = train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/fake_train");
        then.status(200).json_body(json!({}));
    });
    let reference_mock = reference_server.mock(|when, then| {
        when.method(GET).path("/booking_reference");
        then.status(200).body("75bcd15");
    });

    let office = office(&train_server, &reference_server)?;
    let reservation = assert_ok!(office.allocate("fake_train", 1).await);

    train_data_mock.assert();
    reference_mock.assert_hits(0);
    assert!(reservation.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unknown_train_from_not_found_status() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/fake_train");
        then.status(404);
    });

    let office = office(&train_server, &reference_server)?;
    let reservation = office.allocate("fake_train", 1).await?;

    assert!(reservation.is_none());
    Ok(())
}

#[tokio::test]
async fn test_occupation_limit_blocks_persistence() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    // 4 seats, 2 booked: one more makes 75%
    train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/express_2000");
        then.status(200).json_body(json!({"seats": {
            "1A": {"coach": "A", "seat_number": "1", "booking_reference": "ref1"},
            "2A": {"coach": "A", "seat_number": "2", "booking_reference": "ref2"},
            "3A": {"coach": "A", "seat_number": "3", "booking_reference": ""},
            "4A": {"coach": "A", "seat_number": "4", "booking_reference": ""}
        }}));
    });
    let reference_mock = reference_server.mock(|when, then| {
        when.method(GET).path("/booking_reference");
        then.status(200).body("75bcd15");
    });
    let reserve_mock = train_server.mock(|when, then| {
        when.method(POST).path("/reserve");
        then.status(200).json_body(json!({}));
    });

    let office = office(&train_server, &reference_server)?;
    assert_eq!(office.max_occupation_percentage(), DEFAULT_MAX_OCCUPATION_PERCENTAGE);
    let reservation = office.allocate("express_2000", 1).await?;

    assert!(reservation.is_none());
    reference_mock.assert_hits(0);
    reserve_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_train_data_failure_propagates() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/express_2000");
        then.status(500).body("database unavailable");
    });

    let office = office(&train_server, &reference_server)?;
    let err = assert_err!(office.allocate("express_2000", 1).await);

    match err {
        TicketOfficeError::UnexpectedResponse {
            service,
            status,
            body,
        } => {
            assert_eq!(service, "train data");
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_reserve_failure_propagates_after_reference_issued() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/express_2000");
        then.status(200).json_body(json!({"seats": {
            "1A": {"coach": "A", "seat_number": "1", "booking_reference": ""},
            "2A": {"coach": "A", "seat_number": "2", "booking_reference": ""}
        }}));
    });
    let reference_mock = reference_server.mock(|when, then| {
        when.method(GET).path("/booking_reference");
        then.status(200).body("75bcd15");
    });
    train_server.mock(|when, then| {
        when.method(POST).path("/reserve");
        then.status(409).body("already booked");
    });

    let office = office(&train_server, &reference_server)?;
    let result = office.allocate("express_2000", 1).await;

    reference_mock.assert_hits(1);
    assert!(matches!(
        result,
        Err(TicketOfficeError::UnexpectedResponse { status: 409, .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_malformed_train_data_is_a_serialization_error() -> Result<()> {
    let train_server = MockServer::start();
    let reference_server = MockServer::start();

    train_server.mock(|when, then| {
        when.method(GET).path("/data_for_train/express_2000");
        then.status(200).body("<html>oops</html>");
    });

    let office = office(&train_server, &reference_server)?;
    let result = office.allocate("express_2000", 1).await;

    assert!(matches!(
        result,
        Err(TicketOfficeError::SerializationError(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_an_api_error() -> Result<()> {
    let reference_server = MockServer::start();
    // 保留的 port，沒有服務在聽
    let train_data = HttpTrainDataAdapter::new("http://127.0.0.1:9")?;
    let office = TicketOffice::new(
        train_data,
        HttpBookingReferenceAdapter::new(&reference_server.base_url())?,
    );

    let result = office.allocate("express_2000", 1).await;

    assert!(matches!(result, Err(TicketOfficeError::ApiError(_))));
    Ok(())
}
