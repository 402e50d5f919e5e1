pub mod job_queue_message;
