// --- File: crates/bookify_tools/src/schema.rs ---
//! Tool descriptors for the reasoning service.
//!
//! The external reasoning loop discovers the tool surface from these
//! descriptors: one entry per [`crate::models::ToolCall`] variant, with the
//! JSON input schema its arguments deserialize from.

use serde_json::{json, Value};

/// The descriptors of every tool the dispatcher accepts.
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": "select_appointment_date",
            "description": "Lets the user select a date for the appointment.",
            "input_schema": {
                "type": "object",
                "properties": {}
            }
        },
        {
            "name": "select_time_slot",
            "description": "Lets the user select a time slot from available options for the chosen date.",
            "input_schema": {
                "type": "object",
                "properties": {
                    "date": {
                        "type": "string",
                        "description": "The selected appointment date."
                    },
                    "available_time_slots": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Available time slots for the selected date."
                    }
                }
            }
        },
        {
            "name": "create_booking",
            "description": "Create a booking for a specific date and time",
            "input_schema": {
                "type": "object",
                "properties": {
                    "date": {
                        "type": "string",
                        "description": "The date for the booking (format: YYYY-MM-DD)"
                    },
                    "time": {
                        "type": "string",
                        "description": "The time for the booking (format: HH:MM)"
                    }
                },
                "required": ["date", "time"]
            }
        },
        {
            "name": "cancel_booking",
            "description": "Cancel a booking using the booking ID",
            "input_schema": {
                "type": "object",
                "properties": {
                    "booking_id": {
                        "type": "integer",
                        "description": "The ID of the booking to be cancelled"
                    }
                },
                "required": ["booking_id"]
            }
        },
        {
            "name": "confirm_booking",
            "description": "Confirm a booking after creating it",
            "input_schema": {
                "type": "object",
                "properties": {
                    "booking_id": {
                        "type": "integer",
                        "description": "The ID of the booking to be confirmed"
                    },
                    "date": {
                        "type": "string",
                        "description": "The date for the booking (format: YYYY-MM-DD)"
                    },
                    "time": {
                        "type": "string",
                        "description": "The time for the booking (format: HH:MM)"
                    }
                },
                "required": ["booking_id", "date", "time"]
            }
        },
        {
            "name": "lookup_user",
            "description": "Lookup a user based on provided details",
            "input_schema": {
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The name of the user"
                    },
                    "email": {
                        "type": "string",
                        "description": "The email of the user"
                    },
                    "phone_number": {
                        "type": "string",
                        "description": "The phone number of the user"
                    }
                },
                "required": ["name", "email", "phone_number"]
            }
        },
        {
            "name": "change_booking_date",
            "description": "Change the date of an existing booking",
            "input_schema": {
                "type": "object",
                "properties": {
                    "booking_id": {
                        "type": "integer",
                        "description": "The ID of the booking to be changed"
                    },
                    "new_date": {
                        "type": "string",
                        "description": "The new date for the booking (format: YYYY-MM-DD)"
                    }
                },
                "required": ["booking_id", "new_date"]
            }
        },
        {
            "name": "change_booking_time",
            "description": "Change the time of an existing booking",
            "input_schema": {
                "type": "object",
                "properties": {
                    "booking_id": {
                        "type": "integer",
                        "description": "The ID of the booking to be changed"
                    },
                    "new_time": {
                        "type": "string",
                        "description": "The new time for the booking (format: HH:MM)"
                    }
                },
                "required": ["booking_id", "new_time"]
            }
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_descriptor_per_tool() {
        let definitions = tool_definitions();
        let names: Vec<&str> = definitions
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "select_appointment_date",
                "select_time_slot",
                "create_booking",
                "cancel_booking",
                "confirm_booking",
                "lookup_user",
                "change_booking_date",
                "change_booking_time",
            ]
        );
    }

    #[test]
    fn descriptors_carry_their_required_arguments() {
        let definitions = tool_definitions();
        let by_name = |name: &str| -> Value {
            definitions
                .as_array()
                .unwrap()
                .iter()
                .find(|tool| tool["name"] == name)
                .cloned()
                .unwrap()
        };

        assert_eq!(
            by_name("create_booking")["input_schema"]["required"],
            json!(["date", "time"])
        );
        assert_eq!(
            by_name("confirm_booking")["input_schema"]["required"],
            json!(["booking_id", "date", "time"])
        );

        // The two selection helpers take no required arguments at all.
        let select_date = by_name("select_appointment_date");
        assert_eq!(select_date["input_schema"]["properties"], json!({}));
        assert!(select_date["input_schema"].get("required").is_none());
        assert!(by_name("select_time_slot")["input_schema"]
            .get("required")
            .is_none());
    }
}
