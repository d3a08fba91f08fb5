// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the context association lists field
(ANSI/VITA-49.0-2015 section 9.13.2).
*/

use crate::bits::{extract, insert};
use crate::errors::{VrtError, VrtResult};

/// Context association lists: up to five lists of stream/context identifiers
/// associated with this context packet, each borrowed from its source buffer.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextAssociationLists<'a> {
    /// Source context stream identifiers.
    pub source_list: &'a [u32],
    /// System context stream identifiers.
    pub system_list: &'a [u32],
    /// Vector-component stream identifiers.
    pub vector_component_list: &'a [u32],
    /// Asynchronous-channel stream identifiers.
    pub asynchronous_channel_list: &'a [u32],
    /// Per-asynchronous-channel tag words. Present only if non-empty, and
    /// must then be the same length as `asynchronous_channel_list`.
    pub asynchronous_channel_tag_list: Option<&'a [u32]>,
}

impl<'a> ContextAssociationLists<'a> {
    /// Size of this field in 32-bit words: 2 header words plus every list's
    /// length.
    pub fn words(&self) -> u32 {
        let mut words = 2;
        words += self.source_list.len();
        words += self.system_list.len();
        words += self.vector_component_list.len();
        words += self.asynchronous_channel_list.len();
        words += self.asynchronous_channel_tag_list.map_or(0, <[u32]>::len);
        words as u32
    }

    /// Validates that `source_list`/`system_list` fit in 9 bits,
    /// `asynchronous_channel_list` fits in 15 bits, and, if present, the
    /// asynchronous channel tag list is the same length as the asynchronous
    /// channel list.
    pub fn validate(&self) -> VrtResult<()> {
        if self.source_list.len() > 0x1FF {
            return Err(VrtError::SourceListSize);
        }
        if self.system_list.len() > 0x1FF {
            return Err(VrtError::SystemListSize);
        }
        if self.asynchronous_channel_list.len() > 0x7FFF {
            return Err(VrtError::ChannelListSize);
        }
        if let Some(tags) = self.asynchronous_channel_tag_list {
            if tags.len() != self.asynchronous_channel_list.len() {
                return Err(VrtError::ChannelListSize);
            }
        }
        Ok(())
    }

    /// Reads context association lists from the front of `buf`, borrowing
    /// every list directly from `buf` rather than allocating.
    pub fn read(buf: &'a [u32], validate: bool) -> VrtResult<(ContextAssociationLists<'a>, u32)> {
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        let w1 = buf[0];
        let w2 = buf[1];
        let source_list_size = extract(w1, 16, 9) as usize;
        let system_list_size = extract(w1, 0, 9) as usize;
        let vector_component_list_size = extract(w2, 16, 16) as usize;
        let has_tag_list = extract(w2, 15, 1) != 0;
        let async_channel_list_size = extract(w2, 0, 15) as usize;

        let mut offset = 2usize;
        let mut take = |len: usize| -> VrtResult<&'a [u32]> {
            let slice = buf.get(offset..offset + len).ok_or(VrtError::BufSize)?;
            offset += len;
            Ok(slice)
        };
        let source_list = take(source_list_size)?;
        let system_list = take(system_list_size)?;
        let vector_component_list = take(vector_component_list_size)?;
        let asynchronous_channel_list = take(async_channel_list_size)?;
        let asynchronous_channel_tag_list =
            if has_tag_list { Some(take(async_channel_list_size)?) } else { None };

        let lists = ContextAssociationLists {
            source_list,
            system_list,
            vector_component_list,
            asynchronous_channel_list,
            asynchronous_channel_tag_list,
        };
        if validate {
            lists.validate()?;
        }
        Ok((lists, offset as u32))
    }

    /// Writes these context association lists to the front of `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        let words = self.words() as usize;
        if buf.len() < words {
            return Err(VrtError::BufSize);
        }
        buf[0] = insert(self.source_list.len() as u32, 16, 9)
            | insert(self.system_list.len() as u32, 0, 9);
        buf[1] = insert(self.vector_component_list.len() as u32, 16, 16)
            | insert(self.asynchronous_channel_tag_list.is_some() as u32, 15, 1)
            | insert(self.asynchronous_channel_list.len() as u32, 0, 15);

        let mut offset = 2usize;
        let mut put = |list: &[u32]| {
            buf[offset..offset + list.len()].copy_from_slice(list);
            offset += list.len();
        };
        put(self.source_list);
        put(self.system_list);
        put(self.vector_component_list);
        put(self.asynchronous_channel_list);
        if let Some(tags) = self.asynchronous_channel_tag_list {
            put(tags);
        }
        Ok(offset as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_without_tags() {
        let source = [1u32, 2];
        let system = [3u32];
        let vectors: [u32; 0] = [];
        let async_channels = [4u32, 5, 6];
        let lists = ContextAssociationLists {
            source_list: &source,
            system_list: &system,
            vector_component_list: &vectors,
            asynchronous_channel_list: &async_channels,
            asynchronous_channel_tag_list: None,
        };
        let mut buf = [0u32; 8];
        let n = lists.write(&mut buf, true).unwrap();
        assert_eq!(n, 8);
        let (lists2, n2) = ContextAssociationLists::read(&buf, true).unwrap();
        assert_eq!(n2, 8);
        assert_eq!(lists2.source_list, &source);
        assert_eq!(lists2.asynchronous_channel_list, &async_channels);
        assert!(lists2.asynchronous_channel_tag_list.is_none());
    }

    #[test]
    fn round_trip_with_tags() {
        let async_channels = [7u32, 8];
        let tags = [9u32, 10];
        let lists = ContextAssociationLists {
            source_list: &[],
            system_list: &[],
            vector_component_list: &[],
            asynchronous_channel_list: &async_channels,
            asynchronous_channel_tag_list: Some(&tags),
        };
        let mut buf = [0u32; 6];
        lists.write(&mut buf, true).unwrap();
        let (lists2, _) = ContextAssociationLists::read(&buf, true).unwrap();
        assert_eq!(lists2.asynchronous_channel_tag_list, Some(&tags[..]));
    }

    #[test]
    fn oversized_source_list_rejected() {
        let big = vec![0u32; 0x200];
        let lists = ContextAssociationLists {
            source_list: &big,
            system_list: &[],
            vector_component_list: &[],
            asynchronous_channel_list: &[],
            asynchronous_channel_tag_list: None,
        };
        assert_eq!(lists.validate(), Err(VrtError::SourceListSize));
    }
}
