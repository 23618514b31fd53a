pub const HELP_TEXT: &str = "\
Receipt Processor
  $refresh          Reload all receipts and their points
  $list             Show the receipts currently loaded
  $submit <json>    Process a receipt given as one line of JSON
  $submit           Paste a multi-line receipt, end it with an empty line
  $retry            Resubmit the input kept from a failed submission
  $json             Print the loaded receipts as JSON
  $help             Show this help message
  $quit             Exit";

pub fn execute() -> Result<(), String> {
    println!("{}", HELP_TEXT);
    Ok(())
}
