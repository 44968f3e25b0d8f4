/// Unique video identifier (the `videoID` document field).
/// Example: `LKh7zAJ4nwo`
pub type VideoId = String;
/// Uploader account name.
/// Example: `theReceptionist`
pub type UploaderId = String;
/// Category label used as a grouping key.
/// Examples: `Music`, `Entertainment`, `Comedy`
pub type CategoryId = String;
/// Identifier for the source that produced a record.
/// Examples: `videos`, `fixtures`
pub type SourceId = String;
/// One rendered line of report text.
/// Example: `Category: Music, Avg Views: 1523.25`
pub type ReportLine = String;
