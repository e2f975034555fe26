/// Deep link into the CloudWatch console for one log stream. The console
/// URL-decodes the fragment itself, so path separators inside group and
/// stream names are double-encoded as the literal `$252F`.
pub fn log_stream_url(region: &str, log_group: &str, log_stream: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/cloudwatch/home?region={region}#logsV2:log-groups/log-group/{}/log-events/{}",
        encode_console_segment(log_group),
        encode_console_segment(log_stream),
    )
}

fn encode_console_segment(segment: &str) -> String {
    segment.replace('/', "$252F")
}
