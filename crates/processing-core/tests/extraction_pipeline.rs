use std::io::Write;
use std::path::Path;

use vidsonic_common::config::EventConfig;
use vidsonic_media_source::{PixelFrame, RawVideoSpec, WavFile};
use vidsonic_metric_model::{feature_values, parse_events, Feature};
use vidsonic_processing_core::{detect_change_points, ExtractionPipeline};

const WIDTH: u32 = 8;
const HEIGHT: u32 = 6;
const FRAMES: usize = 120;

/// Dark clip with two bright flashes at frames 40 and 80.
fn write_raw_video(path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    for i in 0..FRAMES {
        let rgb = if i == 40 || i == 80 {
            [250, 240, 230]
        } else {
            [12, 16, 20]
        };
        file.write_all(PixelFrame::filled(WIDTH, HEIGHT, rgb).data())
            .unwrap();
    }
}

/// 16-bit stereo tone at constant magnitude 1000, 100 audio frames per video frame plus a tail.
fn write_wav(path: &Path) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 2500,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..(FRAMES * 100 + 37) {
        let s: i16 = if i % 2 == 0 { 1000 } else { -1000 };
        writer.write_sample(s).unwrap();
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn raw_video_and_wav_produce_aligned_event_stream() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("clip.rgb");
    let audio_path = dir.path().join("clip.wav");
    let out_path = dir.path().join("clip.json");
    write_raw_video(&video_path);
    write_wav(&audio_path);

    let video = RawVideoSpec::new(&video_path, WIDTH, HEIGHT, 30.0);
    let audio = WavFile::new(&audio_path);
    let pipeline = ExtractionPipeline::with_defaults();
    let report = pipeline.run(&video, Some(&audio)).unwrap();

    assert_eq!(report.video.frame_count, FRAMES);
    assert_eq!(report.video.duration_secs, 4);

    let brightness = &report.get(Feature::Brightness).unwrap().values;
    assert_eq!(brightness.len(), FRAMES);
    assert!(brightness.iter().all(|v| *v >= 0.0));
    assert_eq!(brightness[40], (250 + 240 + 230) as f64 * 48.0);

    let contrast = &report.get(Feature::Contrast).unwrap().values;
    assert_eq!(contrast.len(), FRAMES - 1);
    assert_eq!(contrast[0], 0.0);
    assert!(contrast[39] > 0.0 && contrast[40] > 0.0);
    assert_eq!(contrast[41], 0.0);

    let amplitude = &report.get(Feature::Amplitude).unwrap().values;
    assert_eq!(amplitude, &vec![1000.0; FRAMES]);

    let written = report.write(&out_path, &EventConfig::default()).unwrap();
    let expected = FRAMES * 3 + (FRAMES - 1) * 2;
    assert_eq!(written as usize, expected);

    let content = std::fs::read_to_string(&out_path).unwrap();
    let events = parse_events(&content).unwrap();
    assert_eq!(events.len(), expected);

    // Element i of every series shares a timestamp.
    let base = events[0].timestamp;
    let first_of_each: Vec<i64> = ["brightness", "histogram", "amplitude", "contrast", "joint"]
        .iter()
        .map(|f| events.iter().find(|e| e.feature == *f).unwrap().timestamp)
        .collect();
    assert!(first_of_each.iter().all(|t| *t == base));
    assert_eq!(events[1].timestamp - events[0].timestamp, 1000);

    let joint = feature_values(&events, "joint");
    assert_eq!(joint.len(), FRAMES);
    let cps = detect_change_points(&joint).unwrap();
    // The first flash opens a marker; the second, 40 frames on, records it.
    assert_eq!(cps.indices(), &[0, 39, FRAMES - 1]);
}

#[test]
fn truncated_dump_frame_is_not_counted() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("short.rgb");
    let mut file = std::fs::File::create(&video_path).unwrap();
    file.write_all(PixelFrame::filled(WIDTH, HEIGHT, [1, 1, 1]).data())
        .unwrap();
    file.write_all(&[9; 10]).unwrap();
    drop(file);

    let pipeline = ExtractionPipeline::with_defaults();
    let info = pipeline
        .probe(&RawVideoSpec::new(&video_path, WIDTH, HEIGHT, 25.0))
        .unwrap();
    assert_eq!(info.frame_count, 1);
}
